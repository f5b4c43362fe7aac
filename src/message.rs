//! Messages flowing through a pipeline and the entities extracted from them.
//!
//! A [`Message`] owns the raw text, the tokens a tokenizer produced (if any) and
//! the entities appended by extractors. Components communicate only through it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::token::Token;

/// A labeled span of the message text.
///
/// `value` is a JSON value so that extractors producing structured or numeric
/// values can share the entity list with dictionary extractors. Offsets count
/// characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Character offset where the span starts
    pub start: usize,
    /// Character offset where the span ends
    pub end: usize,
    /// Normalized value of the entity
    pub value: Value,
    /// Entity label
    #[serde(rename = "entity")]
    pub label: String,
    /// Confidence of the extractor; `None` for exact lexical matches
    pub confidence: Option<f64>,
    /// Name of the component that created the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
    /// Matched surface text, when it differs from what `start..end` implies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Provenance of the dictionary row that produced the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Components that rewrote `value` after extraction, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<String>,
}

impl Entity {
    /// Create an entity with a string value and no confidence.
    pub fn new<V: Into<String>, L: Into<String>>(start: usize, end: usize, value: V, label: L) -> Self {
        Entity {
            start,
            end,
            value: Value::String(value.into()),
            label: label.into(),
            confidence: None,
            extractor: None,
            text: None,
            origin: None,
            processors: Vec::new(),
        }
    }

    /// Replace the value with an arbitrary JSON value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Set the matched surface text.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the origin.
    pub fn with_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the name of the extractor that produced this entity.
    pub fn with_extractor<S: Into<String>>(mut self, extractor: S) -> Self {
        self.extractor = Some(extractor.into());
        self
    }

    /// Record that `processor` rewrote the value of this entity.
    pub fn add_processor<S: Into<String>>(&mut self, processor: S) {
        self.processors.push(processor.into());
    }

    /// The value as text. Strings are returned as-is, anything else in its JSON form.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A parsed message: text, optional tokens and the entities found so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Raw input text
    pub text: String,
    /// Tokens set by a tokenizer component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    /// Entities appended by extractors
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Message {
    /// Create a message with no tokens and no entities.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Message {
            text: text.into(),
            tokens: None,
            entities: Vec::new(),
        }
    }

    /// Create a message with tokens already set.
    pub fn with_tokens<S: Into<String>>(text: S, tokens: Vec<Token>) -> Self {
        Message {
            text: text.into(),
            tokens: Some(tokens),
            entities: Vec::new(),
        }
    }

    /// Tokens, if a tokenizer has run.
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    /// Replace the tokens.
    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = Some(tokens);
    }

    /// Append entities in order.
    pub fn extend_entities<I: IntoIterator<Item = Entity>>(&mut self, entities: I) {
        self.entities.extend(entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_value_text_coerces_non_strings() {
        let entity = Entity::new(0, 2, "42", "number");
        assert_eq!(entity.value_text(), "42");

        let entity = entity.with_value(json!(42));
        assert_eq!(entity.value_text(), "42");

        let entity = Entity::new(0, 4, "true", "flag").with_value(json!(true));
        assert_eq!(entity.value_text(), "true");
    }

    #[test]
    fn test_entity_serialization() {
        let entity = Entity::new(10, 13, "NYC", "city").with_extractor("ner_dict");
        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(
            json,
            json!({
                "start": 10,
                "end": 13,
                "value": "NYC",
                "entity": "city",
                "confidence": null,
                "extractor": "ner_dict"
            })
        );
    }

    #[test]
    fn test_message_tokens() {
        let mut message = Message::new("I live in NYC");
        assert!(message.tokens().is_none());

        message.set_tokens(vec![Token::new("NYC", 10)]);
        assert_eq!(message.tokens().unwrap().len(), 1);
    }
}
