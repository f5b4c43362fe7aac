//! Pipeline components.
//!
//! Every component implements [`Component`]: it declares what it `provides` to
//! and `requires` from earlier components, processes one [`Message`] at a time
//! and persists the configuration needed to rebuild it. Components are built
//! from a JSON object ([`ComponentConfig`]) by a constructor registered under the
//! component's name in a [`ComponentRegistry`]. The same constructor rebuilds a
//! component from its persisted metadata.
//!
//! Built-in components:
//!
//! | name                   | provides | requires |
//! |------------------------|----------|----------|
//! | `tokenizer_whitespace` | tokens   |          |
//! | `tokenizer_unicode`    | tokens   |          |
//! | `tokenizer_regex`      | tokens   |          |
//! | `tokenizer_user_dict`  | tokens   |          |
//! | `ner_dict`             | entities | tokens (token mode) |
//! | `ner_synonyms_dict`    | entities |          |

pub mod ner_dict;
pub mod registry;
pub mod synonyms;
pub mod tokenizer;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{NerdictError, Result};
use crate::message::Message;

pub use ner_dict::{MatchMode, NerDictConfig, NerDictExtractor};
pub use registry::{ComponentConstructor, ComponentRegistry};
pub use synonyms::{EntitySynonymMapper, SynonymConfig};
pub use tokenizer::{TokenizerComponent, TokenizerConfig};

/// Capability name of components that set `message.tokens`.
pub const TOKENS: &str = "tokens";

/// Capability name of components that add or rewrite `message.entities`.
pub const ENTITIES: &str = "entities";

/// Key holding the component name in configurations and metadata.
pub const NAME_KEY: &str = "name";

/// Configuration or persisted metadata of one component: a JSON object with a
/// `name` key and component-specific keys.
pub type ComponentConfig = Map<String, Value>;

/// A pipeline component.
pub trait Component: Send + Sync {
    /// Registered name of the component.
    fn name(&self) -> &'static str;

    /// Capabilities this component adds to a message.
    fn provides(&self) -> &'static [&'static str];

    /// Capabilities that earlier components must provide.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Process one message in place.
    fn process(&self, message: &mut Message) -> Result<()>;

    /// Metadata needed to rebuild this component; never dictionary contents.
    fn persist(&self) -> Result<ComponentConfig>;

    /// Number of dictionary entries the component loaded, or `None` when it
    /// has no dictionary configured.
    fn dictionary_size(&self) -> Option<usize> {
        None
    }
}

/// Name stored in a component configuration.
pub fn config_name(config: &ComponentConfig) -> Result<&str> {
    config
        .get(NAME_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| NerdictError::config("component configuration has no 'name'"))
}

/// Deserialize the component-specific part of a configuration.
pub(crate) fn parse_config<T: DeserializeOwned>(name: &str, config: &ComponentConfig) -> Result<T> {
    serde_json::from_value(Value::Object(config.clone()))
        .map_err(|e| NerdictError::config(format!("invalid configuration for '{name}': {e}")))
}

/// Serialize a component configuration into metadata tagged with `name`.
pub(crate) fn to_metadata<T: Serialize>(name: &str, config: &T) -> Result<ComponentConfig> {
    let mut metadata = match serde_json::to_value(config)? {
        Value::Object(map) => map,
        other => {
            return Err(NerdictError::other(format!(
                "metadata of '{name}' is not an object: {other}"
            )));
        }
    };
    metadata.insert(NAME_KEY.to_string(), Value::String(name.to_string()));
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        path: Option<String>,
        strict: bool,
    }

    fn object(value: Value) -> ComponentConfig {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_config_name() {
        let config = object(json!({"name": "ner_dict"}));
        assert_eq!(config_name(&config).unwrap(), "ner_dict");

        let config = object(json!({"ner_dicts": "data"}));
        assert!(matches!(config_name(&config), Err(NerdictError::Config(_))));
    }

    #[test]
    fn test_parse_config_ignores_name() {
        let config = object(json!({"name": "sample", "strict": true}));
        let sample: Sample = parse_config("sample", &config).unwrap();
        assert_eq!(sample, Sample { path: None, strict: true });
    }

    #[test]
    fn test_parse_config_rejects_wrong_types() {
        let config = object(json!({"name": "sample", "strict": "yes"}));
        let result: Result<Sample> = parse_config("sample", &config);
        assert!(matches!(result, Err(NerdictError::Config(_))));
    }

    #[test]
    fn test_to_metadata_adds_name() {
        let sample = Sample {
            path: Some("dicts".to_string()),
            strict: false,
        };
        let metadata = to_metadata("sample", &sample).unwrap();
        assert_eq!(
            Value::Object(metadata),
            json!({"name": "sample", "path": "dicts", "strict": false})
        );
    }
}
