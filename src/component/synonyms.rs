//! The `ner_synonyms_dict` normalizer.
//!
//! Rewrites the value of entities found by earlier extractors using a synonym
//! dictionary. Without a configured dictionary it leaves entities untouched.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Component, ComponentConfig, ENTITIES, parse_config, to_metadata};
use crate::dictionary::ColumnNames;
use crate::error::Result;
use crate::message::Message;
use crate::synonym::{DEFAULT_REPLACEMENT_COLUMN, DEFAULT_TERM_COLUMN, SynonymMap};

/// Registered name of the normalizer.
pub const NAME: &str = "ner_synonyms_dict";

/// Configuration of [`EntitySynonymMapper`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymConfig {
    /// Synonym file or directory
    pub synonym_dicts: Option<String>,
    /// Header of the column holding the term to normalize
    pub term_column: String,
    /// Header of the column holding the replacement
    pub replacement_column: String,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        SynonymConfig {
            synonym_dicts: None,
            term_column: DEFAULT_TERM_COLUMN.to_string(),
            replacement_column: DEFAULT_REPLACEMENT_COLUMN.to_string(),
        }
    }
}

/// Normalizer applying a [`SynonymMap`] to the message entities.
#[derive(Debug, Clone)]
pub struct EntitySynonymMapper {
    config: SynonymConfig,
    synonyms: Option<SynonymMap>,
}

impl EntitySynonymMapper {
    /// Create a normalizer over an already built synonym map.
    pub fn new(config: SynonymConfig, synonyms: Option<SynonymMap>) -> Self {
        EntitySynonymMapper { config, synonyms }
    }

    /// Create a normalizer, loading the map named by `config.synonym_dicts`.
    pub fn from_config(config: SynonymConfig) -> Result<Self> {
        let columns = ColumnNames::new(
            config.term_column.as_str(),
            config.replacement_column.as_str(),
        );
        let synonyms = SynonymMap::load(config.synonym_dicts.as_deref().map(Path::new), &columns)?;
        Ok(Self::new(config, synonyms))
    }

    /// Registry constructor.
    pub fn create(config: &ComponentConfig) -> Result<Box<dyn Component>> {
        let config: SynonymConfig = parse_config(NAME, config)?;
        Ok(Box::new(Self::from_config(config)?))
    }

    /// The synonym map, if one is configured.
    pub fn synonyms(&self) -> Option<&SynonymMap> {
        self.synonyms.as_ref()
    }
}

impl Component for EntitySynonymMapper {
    fn name(&self) -> &'static str {
        NAME
    }

    fn provides(&self) -> &'static [&'static str] {
        &[ENTITIES]
    }

    fn process(&self, message: &mut Message) -> Result<()> {
        if let Some(synonyms) = &self.synonyms {
            let replaced = synonyms.apply(&mut message.entities, NAME);
            debug!("{NAME} normalized {replaced} entities");
        }
        Ok(())
    }

    fn persist(&self) -> Result<ComponentConfig> {
        to_metadata(NAME, &self.config)
    }

    fn dictionary_size(&self) -> Option<usize> {
        self.synonyms.as_ref().map(SynonymMap::len)
    }
}
