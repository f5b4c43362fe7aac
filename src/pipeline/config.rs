//! Pipeline configuration files.
//!
//! ```json
//! {
//!   "language": "en",
//!   "pipeline": [
//!     {"name": "tokenizer_whitespace"},
//!     {"name": "ner_dict", "ner_dicts": "data/ner"},
//!     {"name": "ner_synonyms_dict", "synonym_dicts": "data/synonyms"}
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::component::ComponentConfig;
use crate::error::{NerdictError, Result};

/// Ordered component configurations plus pipeline-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Language of the messages, informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Component configurations in processing order
    #[serde(default)]
    pub pipeline: Vec<ComponentConfig>,
}

impl PipelineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| NerdictError::config(format!("invalid pipeline configuration: {e}")))
    }

    /// Read a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NerdictError::config(format!(
                "failed to read pipeline configuration '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Names of the configured components, in order.
    pub fn component_names(&self) -> Vec<&str> {
        self.pipeline
            .iter()
            .map(|c| c.get("name").and_then(|n| n.as_str()).unwrap_or("<unnamed>"))
            .collect()
    }
}
