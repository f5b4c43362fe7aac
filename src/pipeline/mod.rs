//! Pipeline host: builds components in order and runs messages through them.
//!
//! ```text
//! text → tokenizer → ner_dict → ner_synonyms_dict → Message { tokens, entities }
//! ```

pub mod config;
pub mod metadata;

use std::path::{Path, PathBuf};

use ahash::AHashSet;
use log::info;

use crate::component::{Component, ComponentRegistry};
use crate::error::{NerdictError, Result};
use crate::message::Message;

pub use config::PipelineConfig;
pub use metadata::{METADATA_FILE_NAME, ModelMetadata};

/// An ordered list of components.
pub struct Pipeline {
    language: Option<String>,
    components: Vec<Box<dyn Component>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.components.iter().map(|c| c.name()).collect();
        f.debug_struct("Pipeline")
            .field("language", &self.language)
            .field("components", &names)
            .finish()
    }
}

impl Pipeline {
    /// Build every configured component in order.
    ///
    /// Fails if a component requires a capability no earlier component
    /// provides, or if any component fails to build.
    pub fn from_config(config: &PipelineConfig, registry: &ComponentRegistry) -> Result<Self> {
        let mut components = Vec::with_capacity(config.pipeline.len());
        for component_config in &config.pipeline {
            components.push(registry.create(component_config)?);
        }
        Self::new(config.language.clone(), components)
    }

    /// Assemble a pipeline from components that are already built.
    pub fn new(language: Option<String>, components: Vec<Box<dyn Component>>) -> Result<Self> {
        let mut provided = AHashSet::new();
        for component in &components {
            for required in component.requires() {
                if !provided.contains(required) {
                    return Err(NerdictError::config(format!(
                        "component '{}' requires '{}', which no earlier component provides",
                        component.name(),
                        required
                    )));
                }
            }
            provided.extend(component.provides().iter().copied());
        }

        Ok(Pipeline {
            language,
            components,
        })
    }

    /// Rebuild a pipeline from the metadata persisted in `dir`.
    pub fn load(dir: &Path, registry: &ComponentRegistry) -> Result<Self> {
        let metadata = ModelMetadata::read(dir)?;
        info!(
            "Loading pipeline written by version {} from {}",
            metadata.version,
            dir.display()
        );
        Self::from_config(&metadata.to_config(), registry)
    }

    /// Write the metadata of every component into `dir`.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf> {
        let metadata = self.metadata()?;
        let path = metadata.write(dir)?;
        info!("Persisted pipeline metadata to {}", path.display());
        Ok(path)
    }

    /// Metadata describing this pipeline.
    pub fn metadata(&self) -> Result<ModelMetadata> {
        let pipeline = self
            .components
            .iter()
            .map(|c| c.persist())
            .collect::<Result<Vec<_>>>()?;
        Ok(ModelMetadata {
            language: self.language.clone(),
            pipeline,
            version: crate::VERSION.to_string(),
        })
    }

    /// Run a message through every component.
    pub fn process(&self, message: &mut Message) -> Result<()> {
        for component in &self.components {
            component.process(message)?;
        }
        Ok(())
    }

    /// Parse `text` into a fully processed message.
    pub fn parse(&self, text: &str) -> Result<Message> {
        let mut message = Message::new(text);
        self.process(&mut message)?;
        Ok(message)
    }

    /// The components in processing order.
    pub fn components(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    /// Language of the pipeline.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    #[test]
    fn test_requires_are_checked() {
        let config = PipelineConfig::from_json(
            r#"{"pipeline": [{"name": "ner_dict", "fail_on_missing_dictionary": false}]}"#,
        )
        .unwrap();

        let result = Pipeline::from_config(&config, &ComponentRegistry::default());
        match result {
            Err(NerdictError::Config(msg)) => assert!(msg.contains("tokens")),
            _ => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_whole_text_mode_needs_no_tokenizer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apps.csv");
        fs::write(&path, "cleaned_name,domain,direct\nWeather Today,app,T\n").unwrap();

        let config = PipelineConfig::from_json(&format!(
            r#"{{"pipeline": [{{
                "name": "ner_dict",
                "ner_dicts": {:?},
                "mode": "whole_text",
                "columns": {{"term": "cleaned_name", "label": "domain", "direct": "direct"}}
            }}]}}"#,
            path.to_string_lossy()
        ))
        .unwrap();

        let pipeline = Pipeline::from_config(&config, &ComponentRegistry::default()).unwrap();
        let message = pipeline.parse("Weather Today").unwrap();
        assert_eq!(message.entities.len(), 1);
        assert_eq!(message.entities[0].label, "app");
    }

    #[test]
    fn test_parse_runs_components_in_order() {
        let dir = TempDir::new().unwrap();
        let ner = dir.path().join("ner.csv");
        let synonyms = dir.path().join("synonyms.csv");
        fs::write(&ner, "nyc,city\n").unwrap();
        fs::write(&synonyms, "gen_name,name\nNYC,New York City\n").unwrap();

        let config = PipelineConfig::from_json(&format!(
            r#"{{"pipeline": [
                {{"name": "tokenizer_whitespace"}},
                {{"name": "ner_dict", "ner_dicts": {:?}}},
                {{"name": "ner_synonyms_dict", "synonym_dicts": {:?}}}
            ]}}"#,
            ner.to_string_lossy(),
            synonyms.to_string_lossy()
        ))
        .unwrap();

        let pipeline = Pipeline::from_config(&config, &ComponentRegistry::default()).unwrap();
        let message = pipeline.parse("I live in nyc").unwrap();

        assert_eq!(message.entities.len(), 1);
        assert_eq!(message.entities[0].value, "New York City");
        assert_eq!(message.entities[0].start, 10);
        assert_eq!(message.entities[0].extractor.as_deref(), Some("ner_dict"));
        assert_eq!(message.entities[0].processors, vec!["ner_synonyms_dict"]);
    }
}
