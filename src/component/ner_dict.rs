//! The `ner_dict` extractor: dictionary entities by exact match.
//!
//! In token mode every token is looked up in the dictionary and a tokenizer
//! must run earlier in the pipeline. In whole-text mode the entire message text
//! is compared with the direct-match rows of the dictionary.
//!
//! Missing dictionary policy: with `fail_on_missing_dictionary` (the default),
//! processing a message without a configured dictionary is an error. With the
//! flag off the extractor does nothing. A configured dictionary that turns out
//! to be empty is never an error.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Component, ComponentConfig, ENTITIES, TOKENS, parse_config, to_metadata};
use crate::dictionary::{ColumnNames, Dictionary, RowLayout};
use crate::error::{NerdictError, Result};
use crate::matcher::{LabelFilter, match_tokens_filtered, match_whole_text_filtered};
use crate::message::Message;

/// Registered name of the extractor.
pub const NAME: &str = "ner_dict";

/// What the extractor compares with dictionary terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Each token of the message
    #[default]
    Tokens,
    /// The whole message text, against direct-match rows only
    WholeText,
}

/// Configuration of [`NerDictExtractor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NerDictConfig {
    /// Dictionary file or directory
    pub ner_dicts: Option<String>,
    /// Matching mode
    pub mode: MatchMode,
    /// Fail at processing time when no dictionary is configured
    pub fail_on_missing_dictionary: bool,
    /// Only emit entities with these labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<String>>,
    /// Header names to read; headerless term,label rows when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnNames>,
}

impl Default for NerDictConfig {
    fn default() -> Self {
        NerDictConfig {
            ner_dicts: None,
            mode: MatchMode::Tokens,
            fail_on_missing_dictionary: true,
            dimensions: None,
            columns: None,
        }
    }
}

impl NerDictConfig {
    /// Row layout implied by `columns`.
    pub fn layout(&self) -> RowLayout {
        match &self.columns {
            Some(columns) => RowLayout::Named(columns.clone()),
            None => RowLayout::Positional,
        }
    }
}

/// Extractor appending dictionary matches to the message entities.
#[derive(Debug, Clone)]
pub struct NerDictExtractor {
    config: NerDictConfig,
    dictionary: Option<Dictionary>,
}

impl NerDictExtractor {
    /// Create an extractor over an already loaded dictionary.
    pub fn new(config: NerDictConfig, dictionary: Option<Dictionary>) -> Self {
        NerDictExtractor { config, dictionary }
    }

    /// Create an extractor, loading the dictionary named by `config.ner_dicts`.
    pub fn from_config(config: NerDictConfig) -> Result<Self> {
        let dictionary = Dictionary::load(config.ner_dicts.as_deref().map(Path::new), &config.layout())?;
        Ok(Self::new(config, dictionary))
    }

    /// Registry constructor.
    pub fn create(config: &ComponentConfig) -> Result<Box<dyn Component>> {
        let config: NerDictConfig = parse_config(NAME, config)?;
        Ok(Box::new(Self::from_config(config)?))
    }

    /// The dictionary, if one is configured.
    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    /// The configuration this extractor was built with.
    pub fn config(&self) -> &NerDictConfig {
        &self.config
    }
}

impl Component for NerDictExtractor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn provides(&self) -> &'static [&'static str] {
        &[ENTITIES]
    }

    fn requires(&self) -> &'static [&'static str] {
        match self.config.mode {
            MatchMode::Tokens => &[TOKENS],
            MatchMode::WholeText => &[],
        }
    }

    fn process(&self, message: &mut Message) -> Result<()> {
        let Some(dictionary) = self.dictionary.as_ref() else {
            if self.config.fail_on_missing_dictionary {
                return Err(NerdictError::missing_dictionary(format!(
                    "{NAME} cannot extract entities without a NER dictionary"
                )));
            }
            debug!("{NAME} has no dictionary, skipping");
            return Ok(());
        };

        let filter = LabelFilter::from_option(self.config.dimensions.as_deref());
        let entities = match self.config.mode {
            MatchMode::Tokens => {
                let tokens = message.tokens().ok_or_else(|| {
                    NerdictError::missing_tokens(format!(
                        "{NAME} needs a tokenizer earlier in the pipeline"
                    ))
                })?;
                match_tokens_filtered(tokens, Some(dictionary), filter)
            }
            MatchMode::WholeText => {
                match_whole_text_filtered(&message.text, Some(dictionary), filter)
                    .into_iter()
                    .collect()
            }
        };

        debug!("{NAME} found {} entities", entities.len());
        message.extend_entities(entities.into_iter().map(|e| e.with_extractor(NAME)));
        Ok(())
    }

    fn persist(&self) -> Result<ComponentConfig> {
        to_metadata(NAME, &self.config)
    }

    fn dictionary_size(&self) -> Option<usize> {
        self.dictionary.as_ref().map(Dictionary::len)
    }
}
