//! Persisted pipeline metadata.
//!
//! Only component configuration is written: dictionary paths and options, never
//! dictionary contents. Loading rebuilds every component by re-reading its paths.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::component::ComponentConfig;
use crate::error::{NerdictError, Result};
use crate::pipeline::config::PipelineConfig;

/// File name of the metadata inside a model directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Contents of `metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Language of the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Persisted metadata of each component, in order
    pub pipeline: Vec<ComponentConfig>,
    /// Version of the library that wrote the metadata
    pub version: String,
}

impl ModelMetadata {
    /// Path of the metadata file inside `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(METADATA_FILE_NAME)
    }

    /// Write the metadata into `dir`, creating the directory if needed.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = Self::path_in(dir);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    /// Read the metadata from `dir`.
    pub fn read(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        let content = fs::read_to_string(&path).map_err(|e| {
            NerdictError::config(format!("failed to read model metadata '{}': {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The pipeline configuration that rebuilds the persisted components.
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            language: self.language.clone(),
            pipeline: self.pipeline.clone(),
        }
    }
}
