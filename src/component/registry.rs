//! Name-keyed registry of component constructors.

use ahash::AHashMap;

use super::ner_dict::{self, NerDictExtractor};
use super::synonyms::{self, EntitySynonymMapper};
use super::tokenizer::{self, TokenizerComponent};
use super::{Component, ComponentConfig, config_name};
use crate::error::{NerdictError, Result};

/// Builds a component from its configuration or persisted metadata.
pub type ComponentConstructor = fn(&ComponentConfig) -> Result<Box<dyn Component>>;

/// Maps component names to constructors.
///
/// [`ComponentRegistry::default`] knows every built-in component. Hosts can
/// register their own constructors next to them.
#[derive(Clone)]
pub struct ComponentRegistry {
    constructors: AHashMap<&'static str, ComponentConstructor>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(tokenizer::WHITESPACE, TokenizerComponent::whitespace);
        registry.register(tokenizer::UNICODE, TokenizerComponent::unicode);
        registry.register(tokenizer::REGEX, TokenizerComponent::regex);
        registry.register(tokenizer::USER_DICT, TokenizerComponent::user_dict);
        registry.register(ner_dict::NAME, NerDictExtractor::create);
        registry.register(synonyms::NAME, EntitySynonymMapper::create);
        registry
    }
}

impl ComponentRegistry {
    /// Create a registry with the built-in components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry without any components.
    pub fn empty() -> Self {
        ComponentRegistry {
            constructors: AHashMap::new(),
        }
    }

    /// Register a constructor, replacing any previous one under `name`.
    pub fn register(&mut self, name: &'static str, constructor: ComponentConstructor) {
        self.constructors.insert(name, constructor);
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constructors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Build the component named by `config["name"]`.
    pub fn create(&self, config: &ComponentConfig) -> Result<Box<dyn Component>> {
        let name = config_name(config)?;
        let constructor = self.constructors.get(name).ok_or_else(|| {
            NerdictError::config(format!(
                "unknown component '{name}', expected one of: {}",
                self.names().join(", ")
            ))
        })?;
        constructor(config)
    }
}
