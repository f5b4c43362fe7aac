//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{CharOffsets, Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut offsets = CharOffsets::new(text);
        let mut running = 0;
        let mut tokens = Vec::new();

        for (position, word) in text.split_whitespace().enumerate() {
            // Search from the end of the previous word so repeats get their own offset
            let start = running + text[running..].find(word).unwrap_or(0);
            running = start + word.len();

            let token = Token::new(word, offsets.at(start))
                .with_position(position)
                .with_token_type(TokenType::detect(word));
            tokens.push(token);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
