//! Exact-match entity recognition against a [`Dictionary`].
//!
//! Two modes are provided:
//!
//! - [`match_tokens`] compares every token with every dictionary term and emits
//!   one entity per matching entry. A token listed under three labels yields
//!   three entities, and a row repeated in the dictionary yields a repeated
//!   entity; choosing between them is left to later components.
//! - [`match_whole_text`] compares the entire message text with the terms of
//!   entries flagged as direct matches.
//!
//! Both are pure functions of their inputs. An absent or empty dictionary
//! matches nothing.

use crate::analysis::token::Token;
use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::message::Entity;

/// Confidence reported for whole-text matches.
pub const WHOLE_TEXT_CONFIDENCE: f64 = 1.0;

/// Restricts which dictionary labels may produce entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFilter<'a> {
    labels: Option<&'a [String]>,
}

impl<'a> LabelFilter<'a> {
    /// Accept every label.
    pub fn all() -> Self {
        LabelFilter { labels: None }
    }

    /// Accept only the given labels.
    pub fn only(labels: &'a [String]) -> Self {
        LabelFilter {
            labels: Some(labels),
        }
    }

    /// Build a filter from an optional label list.
    pub fn from_option(labels: Option<&'a [String]>) -> Self {
        LabelFilter { labels }
    }

    /// Check whether `label` passes the filter.
    pub fn accepts(&self, label: &str) -> bool {
        self.labels
            .is_none_or(|labels| labels.iter().any(|l| l == label))
    }
}

/// Find every dictionary entry whose term equals a token's text.
///
/// Entities come out in token order, and for one token in dictionary order.
pub fn match_tokens(tokens: &[Token], dictionary: Option<&Dictionary>) -> Vec<Entity> {
    match_tokens_filtered(tokens, dictionary, LabelFilter::all())
}

/// Like [`match_tokens`], keeping only entries whose label passes `filter`.
pub fn match_tokens_filtered(
    tokens: &[Token],
    dictionary: Option<&Dictionary>,
    filter: LabelFilter<'_>,
) -> Vec<Entity> {
    let Some(dictionary) = dictionary else {
        return Vec::new();
    };

    let mut entities = Vec::new();
    for token in tokens {
        for entry in dictionary {
            if entry.term == token.text && filter.accepts(&entry.label) {
                entities.push(Entity::new(
                    token.start_offset,
                    token.end_offset,
                    token.text.as_str(),
                    entry.label.as_str(),
                ));
            }
        }
    }
    entities
}

/// Match the whole text against the direct-match entries of the dictionary.
///
/// The first direct entry whose term equals `text` produces an entity spanning
/// the text. Its `end` is the offset of the last character, not one past it.
pub fn match_whole_text(text: &str, dictionary: Option<&Dictionary>) -> Option<Entity> {
    match_whole_text_filtered(text, dictionary, LabelFilter::all())
}

/// Like [`match_whole_text`], keeping only entries whose label passes `filter`.
pub fn match_whole_text_filtered(
    text: &str,
    dictionary: Option<&Dictionary>,
    filter: LabelFilter<'_>,
) -> Option<Entity> {
    let entry = dictionary?
        .iter()
        .find(|entry| entry.direct && entry.term == text && filter.accepts(&entry.label))?;

    Some(whole_text_entity(entry))
}

fn whole_text_entity(entry: &DictionaryEntry) -> Entity {
    let end = entry.term.chars().count().saturating_sub(1);
    let mut entity = Entity::new(0, end, entry.term.as_str(), entry.label.as_str())
        .with_text(entry.term.as_str())
        .with_confidence(WHOLE_TEXT_CONFIDENCE);
    if let Some(origin) = &entry.origin {
        entity = entity.with_origin(origin.as_str());
    }
    entity
}
