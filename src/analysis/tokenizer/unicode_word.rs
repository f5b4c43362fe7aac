//! Unicode word tokenizer implementation.
//!
//! This module provides a tokenizer that splits text using Unicode word boundary
//! rules (UAX #29). Segments without any alphanumeric character (whitespace,
//! punctuation) are dropped. CJK ideographs come out one per token.
//!
//! # Examples
//!
//! ```
//! use nerdict::analysis::tokenizer::Tokenizer;
//! use nerdict::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{CharOffsets, Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }

    /// Word segments of `text` as `(byte_offset, segment)` pairs.
    pub(crate) fn segments(text: &str) -> impl Iterator<Item = (usize, &str)> {
        text.split_word_bound_indices()
            .filter(|(_, word)| word.chars().any(|c| c.is_alphanumeric()))
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut offsets = CharOffsets::new(text);
        let tokens: Vec<Token> = Self::segments(text)
            .enumerate()
            .map(|(position, (start, word))| {
                Token::new(word, offsets.at(start))
                    .with_position(position)
                    .with_token_type(TokenType::detect(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
