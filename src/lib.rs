//! # nerdict
//!
//! Dictionary-driven entity extraction for NLU pipelines.
//!
//! ## Features
//!
//! - CSV dictionaries loaded from a file or a directory of files
//! - Exact token matching, or whole-text matching against direct-match rows
//! - Case-insensitive synonym normalization of extracted values
//! - Whitespace, Unicode, regex and user-dictionary tokenizers
//! - Pipelines persisted as configuration and rebuilt from their dictionary paths
//!
//! ```
//! use nerdict::analysis::token::Token;
//! use nerdict::dictionary::{Dictionary, DictionaryEntry};
//! use nerdict::matcher::match_tokens;
//!
//! let dictionary = Dictionary::from_entries(vec![DictionaryEntry::new("NYC", "city")]);
//! let tokens = vec![Token::new("NYC", 10)];
//!
//! let entities = match_tokens(&tokens, Some(&dictionary));
//! assert_eq!(entities[0].label, "city");
//! ```

pub mod analysis;
pub mod cli;
pub mod component;
pub mod dictionary;
pub mod error;
pub mod matcher;
pub mod message;
pub mod pipeline;
pub mod synonym;

pub mod prelude {
    pub use crate::component::{Component, ComponentRegistry};
    pub use crate::dictionary::{Dictionary, DictionaryEntry};
    pub use crate::error::{NerdictError, Result};
    pub use crate::message::{Entity, Message};
    pub use crate::pipeline::{Pipeline, PipelineConfig};
    pub use crate::synonym::SynonymMap;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
