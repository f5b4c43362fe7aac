//! Tokenizer driven by a user word list.
//!
//! Text is first cut at Unicode word boundaries. At every boundary the tokenizer
//! then looks for the longest user word that starts there and ends on a later
//! boundary (forward maximum matching). CJK ideographs are single segments, so
//! user words glue them back into words; Latin words are never split because a
//! match must end on a word boundary.
//!
//! ```text
//! User words: 北京, 天安门
//! Text:       我去北京天安门
//! Tokens:     我 / 去 / 北京 / 天安门
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use log::info;
use unicode_segmentation::UnicodeSegmentation;

use super::Tokenizer;
use crate::analysis::token::{CharOffsets, Token, TokenStream, TokenType};
use crate::dictionary::resolve_paths;
use crate::error::{NerdictError, Result};

/// A set of user words for [`UserDictTokenizer`].
///
/// Word list files hold one word per line. Only the first whitespace-separated
/// field of a line is used, so `北京 ns 100` adds `北京`. Blank lines are skipped.
#[derive(Debug, Clone, Default)]
pub struct UserDictionary {
    words: AHashSet<String>,
    max_chars: usize,
}

impl UserDictionary {
    /// Create an empty user dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load user words from a file or a directory of word lists.
    ///
    /// Returns `Ok(None)` when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Option<Self>> {
        let Some(files) = resolve_paths(path, "user")? else {
            return Ok(None);
        };

        let mut dictionary = UserDictionary::new();
        for file in &files {
            info!("Loading user dictionary at {}", file.display());
            let content =
                fs::read_to_string(file).map_err(|e| NerdictError::path_unreadable(file, e))?;
            for line in content.lines() {
                if let Some(word) = line.split_whitespace().next() {
                    dictionary.add_word(word);
                }
            }
        }

        Ok(Some(dictionary))
    }

    /// Add a single word.
    pub fn add_word<S: Into<String>>(&mut self, word: S) {
        let word = word.into();
        if word.is_empty() {
            return;
        }
        self.max_chars = self.max_chars.max(word.chars().count());
        self.words.insert(word);
    }

    /// Check whether `word` is a user word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of user words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if there are no user words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Character length of the longest user word.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl<S: Into<String>> FromIterator<S> for UserDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = UserDictionary::new();
        for word in iter {
            dictionary.add_word(word);
        }
        dictionary
    }
}

/// A tokenizer that prefers the longest user word at each word boundary.
///
/// Without a user dictionary it produces the same tokens as
/// [`UnicodeWordTokenizer`](super::UnicodeWordTokenizer).
#[derive(Debug, Clone, Default)]
pub struct UserDictTokenizer {
    dictionary: Option<UserDictionary>,
}

impl UserDictTokenizer {
    /// Create a tokenizer over an optional user dictionary.
    pub fn new(dictionary: Option<UserDictionary>) -> Self {
        UserDictTokenizer { dictionary }
    }

    /// Create a tokenizer by loading user words from `path`.
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        Ok(Self::new(UserDictionary::load(path)?))
    }

    /// The user dictionary, if one is configured.
    pub fn dictionary(&self) -> Option<&UserDictionary> {
        self.dictionary.as_ref()
    }

    /// Index of the last segment of the longest user word starting at `first`.
    fn longest_match(&self, text: &str, segments: &[(usize, &str)], first: usize) -> Option<usize> {
        let dictionary = self.dictionary.as_ref().filter(|d| !d.is_empty())?;
        let start = segments[first].0;

        let mut chars = 0;
        let mut best = None;
        for (index, (offset, segment)) in segments.iter().enumerate().skip(first) {
            chars += segment.chars().count();
            if chars > dictionary.max_chars() {
                break;
            }
            if dictionary.contains(&text[start..offset + segment.len()]) {
                best = Some(index);
            }
        }
        best
    }
}

impl Tokenizer for UserDictTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let segments: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
        let mut offsets = CharOffsets::new(text);
        let mut tokens = Vec::new();

        let mut index = 0;
        while index < segments.len() {
            let start = segments[index].0;
            let last = match self.longest_match(text, &segments, index) {
                Some(last) => last,
                None => {
                    let segment = segments[index].1;
                    if !segment.chars().any(|c| c.is_alphanumeric()) {
                        index += 1;
                        continue;
                    }
                    index
                }
            };

            let end = segments[last].0 + segments[last].1.len();
            let word = &text[start..end];
            tokens.push(
                Token::new(word, offsets.at(start))
                    .with_position(tokens.len())
                    .with_token_type(TokenType::detect(word)),
            );
            index = last + 1;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "user_dict"
    }
}
