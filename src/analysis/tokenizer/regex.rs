//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{CharOffsets, Token, TokenStream, TokenType};
use crate::error::{NerdictError, Result};

/// Pattern used when a regex tokenizer is configured without one.
pub const DEFAULT_PATTERN: &str = r"\w+";

/// A regex-based tokenizer that extracts tokens using regular expressions.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether to extract gaps (text between matches) instead of matches
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern `\w+`.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| NerdictError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            gaps: false,
        })
    }

    /// Create a tokenizer that extracts gaps (text between matches) instead of matches.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        let mut tokenizer = Self::with_pattern(pattern)?;
        tokenizer.gaps = true;
        Ok(tokenizer)
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this tokenizer extracts gaps.
    pub fn gaps(&self) -> bool {
        self.gaps
    }

    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        if !self.gaps {
            return self
                .pattern
                .find_iter(text)
                .filter(|mat| !mat.as_str().is_empty())
                .map(|mat| (mat.start(), mat.end()))
                .collect();
        }

        let mut spans = Vec::new();
        let mut last_end = 0;
        for mat in self.pattern.find_iter(text) {
            if mat.start() > last_end {
                spans.push((last_end, mat.start()));
            }
            last_end = mat.end();
        }
        if last_end < text.len() {
            spans.push((last_end, text.len()));
        }
        spans
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut offsets = CharOffsets::new(text);
        let tokens: Vec<Token> = self
            .spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| {
                let word = &text[start..end];
                Token::new(word, offsets.at(start))
                    .with_position(position)
                    .with_token_type(TokenType::detect(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
