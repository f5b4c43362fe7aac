//! Error types for the nerdict library.
//!
//! All errors are represented by the [`NerdictError`] enum. Some conditions are
//! *not* errors: an unconfigured dictionary path is logged and
//! yields no dictionary, and a conflicting synonym definition is logged and
//! overwritten.
//!
//! # Examples
//!
//! ```
//! use nerdict::error::{NerdictError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(NerdictError::config("unknown component 'foo'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for nerdict operations.
#[derive(Error, Debug)]
pub enum NerdictError {
    /// I/O errors not tied to a configured dictionary path
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configured dictionary path does not exist or cannot be read
    #[error("Cannot read dictionary path '{}': {source}", path.display())]
    PathUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A dictionary row or header is missing an expected column
    #[error("Malformed row in '{}' at line {line}: {reason}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// An extractor that requires a dictionary was constructed without one
    #[error("Missing dictionary: {0}")]
    MissingDictionary(String),

    /// A token-scan extractor received a message without tokens
    #[error("Missing tokens: {0}")]
    MissingTokens(String),

    /// Pipeline or component configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with NerdictError.
pub type Result<T> = std::result::Result<T, NerdictError>;

impl NerdictError {
    /// Create a new path-unreadable error.
    pub fn path_unreadable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        NerdictError::PathUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a new malformed-row error.
    pub fn malformed_row<P: Into<PathBuf>, S: Into<String>>(path: P, line: u64, reason: S) -> Self {
        NerdictError::MalformedRow {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a new missing-dictionary error.
    pub fn missing_dictionary<S: Into<String>>(msg: S) -> Self {
        NerdictError::MissingDictionary(msg.into())
    }

    /// Create a new missing-tokens error.
    pub fn missing_tokens<S: Into<String>>(msg: S) -> Self {
        NerdictError::MissingTokens(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        NerdictError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        NerdictError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        NerdictError::Other(msg.into())
    }
}
