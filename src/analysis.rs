//! Text analysis: tokens and the tokenizers that produce them.

pub mod token;
pub mod tokenizer;

pub use token::{Token, TokenStream, TokenType};
pub use tokenizer::Tokenizer;
