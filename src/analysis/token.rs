//! Token types produced by tokenizers and consumed by extractors.
//!
//! A token is a word-like unit of the message text together with its span.
//! Offsets count characters (Unicode scalar values), not bytes, so the spans of
//! CJK text line up with what a character-indexed consumer expects:
//!
//! ```text
//! Text:    "我 住在 北京"
//! Tokens:  "我"  [0, 1)
//!          "住在" [2, 4)
//!          "北京" [5, 7)
//! ```
//!
//! # Examples
//!
//! ```
//! use nerdict::analysis::token::Token;
//!
//! let token = Token::new("NYC", 10);
//! assert_eq!(token.start_offset, 10);
//! assert_eq!(token.end_offset, 13);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// `end_offset` is always `start_offset` plus the character length of `text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token sequence (0-based)
    #[serde(default)]
    pub position: usize,

    /// Character offset where this token starts in the message text
    #[serde(rename = "start")]
    pub start_offset: usize,

    /// Character offset one past the end of this token
    #[serde(rename = "end")]
    pub end_offset: usize,

    /// Script classification, when the tokenizer detected one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Alphanumeric text (English, Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK (Chinese, Japanese, Korean) ideographs
    Cjk,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Hangul characters (Korean)
    Hangul,
    /// Punctuation marks
    Punctuation,
    /// Other/unknown token types
    Other,
}

impl Token {
    /// Create a token starting at the given character offset.
    pub fn new<S: Into<String>>(text: S, start_offset: usize) -> Self {
        let text = text.into();
        let end_offset = start_offset + text.chars().count();
        Token {
            text,
            position: 0,
            start_offset,
            end_offset,
            token_type: None,
        }
    }

    /// Character length of the token text.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the position of this token in the sequence.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TokenType {
    /// Classify a word by the scripts of its characters.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(|c| {
            matches!(c,
                '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
                '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
                '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
                '\u{2A700}'..='\u{2B73F}' | // CJK Extension C
                '\u{2B740}'..='\u{2B81F}' | // CJK Extension D
                '\u{2B820}'..='\u{2CEAF}'   // CJK Extension E
            )
        }) {
            return TokenType::Cjk;
        }

        if word
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return TokenType::Alphanum;
        }

        if word.chars().all(|c| c.is_ascii_punctuation()) {
            return TokenType::Punctuation;
        }

        TokenType::Other
    }
}

/// A token stream represents a sequence of tokens from a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Converts ascending byte offsets of one text into character offsets.
///
/// Tokenizers walk the text front to back, so the mapper only ever moves
/// forward. Asking for a byte offset behind the last one restarts the count.
pub(crate) struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        CharOffsets {
            text,
            byte: 0,
            chars: 0,
        }
    }

    /// Character offset of `byte`, which must lie on a char boundary.
    pub(crate) fn at(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
