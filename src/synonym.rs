//! Synonym normalization of extracted entity values.
//!
//! A [`SynonymMap`] maps lower-cased terms to canonical replacements. Applying it
//! to a list of entities rewrites the value of every entity whose lower-cased
//! value is a key; nothing else about the entity changes.
//!
//! Conflicting definitions (the same key mapped to two different replacements)
//! are resolved by keeping the last one. Each conflict is logged as a warning and
//! kept in [`SynonymMap::conflicts`].
//!
//! # Examples
//!
//! ```
//! use nerdict::message::Entity;
//! use nerdict::synonym::SynonymMap;
//!
//! let synonyms = SynonymMap::build([("NYC", "New York City")]);
//! let mut entities = vec![Entity::new(0, 3, "nyc", "city")];
//!
//! synonyms.apply(&mut entities, "ner_synonyms_dict");
//! assert_eq!(entities[0].value, "New York City");
//! ```

use std::path::Path;

use ahash::AHashMap;
use log::{info, warn};
use serde_json::Value;

use crate::dictionary::reader::read_entries;
use crate::dictionary::{ColumnNames, RowLayout, resolve_paths};
use crate::error::Result;
use crate::message::Entity;

/// Default header of the column holding the term to normalize.
pub const DEFAULT_TERM_COLUMN: &str = "gen_name";

/// Default header of the column holding the replacement.
pub const DEFAULT_REPLACEMENT_COLUMN: &str = "name";

/// A synonym definition that overwrote an earlier, different one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymConflict {
    /// Lower-cased key
    pub key: String,
    /// Replacement that was overwritten
    pub previous: String,
    /// Replacement now stored
    pub replacement: String,
}

/// Case-insensitive mapping from terms to replacements.
#[derive(Debug, Clone, Default)]
pub struct SynonymMap {
    synonyms: AHashMap<String, String>,
    conflicts: Vec<SynonymConflict>,
}

impl SynonymMap {
    /// Create an empty synonym map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(term, replacement)` pairs in order.
    pub fn build<I, T, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = (T, R)>,
        T: AsRef<str>,
        R: AsRef<str>,
    {
        let mut map = SynonymMap::new();
        for (term, replacement) in rows {
            map.insert(term.as_ref(), Some(replacement.as_ref()));
        }
        map
    }

    /// Load a map from a CSV file or a directory of CSV files with a header row.
    ///
    /// `columns.term` names the term column and `columns.label` the replacement
    /// column. Rows with an empty replacement are ignored. Returns `Ok(None)`
    /// when no path is configured.
    pub fn load(path: Option<&Path>, columns: &ColumnNames) -> Result<Option<Self>> {
        let Some(files) = resolve_paths(path, "synonym")? else {
            return Ok(None);
        };

        let layout = RowLayout::Named(columns.clone());
        let mut map = SynonymMap::new();
        for file in &files {
            info!("Loading synonym dictionary at {}", file.display());
            for entry in read_entries(file, &layout)? {
                let replacement = Some(entry.label.as_str()).filter(|r| !r.is_empty());
                map.insert(&entry.term, replacement);
            }
        }

        Ok(Some(map))
    }

    /// Add one synonym definition.
    ///
    /// Nothing is stored when `replacement` is absent or equal to `term`.
    /// Returns `true` when the definition overwrote a different replacement.
    pub fn insert(&mut self, term: &str, replacement: Option<&str>) -> bool {
        let Some(replacement) = replacement else {
            return false;
        };
        if term == replacement {
            return false;
        }

        let key = term.to_lowercase();
        let conflict = match self.synonyms.get(&key) {
            Some(previous) if previous != replacement => Some(SynonymConflict {
                key: key.clone(),
                previous: previous.clone(),
                replacement: replacement.to_string(),
            }),
            _ => None,
        };

        if let Some(conflict) = &conflict {
            warn!(
                "Found conflicting synonym definitions for {:?}. Overwriting target {:?} with {:?}. \
                 Check your dictionaries and remove conflicting synonym definitions.",
                conflict.key, conflict.previous, conflict.replacement
            );
        }

        self.synonyms.insert(key, replacement.to_string());
        match conflict {
            Some(conflict) => {
                self.conflicts.push(conflict);
                true
            }
            None => false,
        }
    }

    /// Look up the replacement for `value`, ignoring case.
    pub fn get(&self, value: &str) -> Option<&str> {
        self.synonyms.get(&value.to_lowercase()).map(String::as_str)
    }

    /// Rewrite entity values in place and tag each rewritten entity with `processor`.
    ///
    /// Non-string values are compared by their JSON text and, when replaced,
    /// become strings. Returns the number of entities rewritten.
    pub fn apply(&self, entities: &mut [Entity], processor: &str) -> usize {
        let mut replaced = 0;
        for entity in entities.iter_mut() {
            if let Some(replacement) = self.get(&entity.value_text()) {
                entity.value = Value::String(replacement.to_string());
                entity.add_processor(processor);
                replaced += 1;
            }
        }
        replaced
    }

    /// Conflicts resolved while building the map, in the order they occurred.
    pub fn conflicts(&self) -> &[SynonymConflict] {
        &self.conflicts
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// Check if the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    /// Iterate over `(key, replacement)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.synonyms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for SynonymMap {
    fn eq(&self, other: &Self) -> bool {
        self.synonyms == other.synonyms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_keys_are_lower_cased() {
        let map = SynonymMap::build([("NYC", "New York City")]);
        assert_eq!(map.get("nyc"), Some("New York City"));
        assert_eq!(map.get("NyC"), Some("New York City"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_identity_and_absent_replacements_are_skipped() {
        let mut map = SynonymMap::new();
        map.insert("Paris", Some("Paris"));
        map.insert("Rome", None);
        assert!(map.is_empty());

        // Only an exact match counts as identity
        map.insert("paris", Some("Paris"));
        assert_eq!(map.get("PARIS"), Some("Paris"));
    }

    #[test]
    fn test_reinsertion_is_idempotent() {
        let once = SynonymMap::build([("NYC", "New York City")]);
        let twice = SynonymMap::build([("NYC", "New York City"), ("nyc", "New York City")]);

        assert_eq!(once, twice);
        assert!(twice.conflicts().is_empty());
    }

    #[test]
    fn test_conflict_last_write_wins() {
        let map = SynonymMap::build([("NY", "New York"), ("ny", "New York City")]);

        assert_eq!(map.get("ny"), Some("New York City"));
        assert_eq!(
            map.conflicts(),
            &[SynonymConflict {
                key: "ny".to_string(),
                previous: "New York".to_string(),
                replacement: "New York City".to_string(),
            }]
        );
    }

    #[test]
    fn test_apply_only_changes_value() {
        let map = SynonymMap::build([("NYC", "New York City")]);
        let mut entities = vec![
            Entity::new(10, 13, "nyc", "city").with_extractor("ner_dict"),
            Entity::new(20, 25, "Paris", "city"),
        ];

        let replaced = map.apply(&mut entities, "ner_synonyms_dict");

        assert_eq!(replaced, 1);
        assert_eq!(entities[0].value, "New York City");
        assert_eq!(entities[0].start, 10);
        assert_eq!(entities[0].end, 13);
        assert_eq!(entities[0].label, "city");
        assert_eq!(entities[0].extractor.as_deref(), Some("ner_dict"));
        assert_eq!(entities[0].processors, vec!["ner_synonyms_dict"]);
        assert_eq!(entities[1].value, "Paris");
        assert!(entities[1].processors.is_empty());
    }

    #[test]
    fn test_apply_coerces_non_string_values() {
        let map = SynonymMap::build([("1", "one")]);
        let mut entities = vec![Entity::new(0, 1, "1", "number").with_value(json!(1))];

        map.apply(&mut entities, "ner_synonyms_dict");
        assert_eq!(entities[0].value, json!("one"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.csv"),
            "gen_name,name\nnyc,New York City\nbj,\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.csv"), "gen_name,name\nNYC,NYC\nsh,Shanghai\n").unwrap();

        let columns = ColumnNames::new(DEFAULT_TERM_COLUMN, DEFAULT_REPLACEMENT_COLUMN);
        let map = SynonymMap::load(Some(dir.path()), &columns).unwrap().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("NYC"), Some("New York City"));
        assert_eq!(map.get("sh"), Some("Shanghai"));
        assert!(map.get("bj").is_none());
    }

    #[test]
    fn test_load_unconfigured() {
        let columns = ColumnNames::new(DEFAULT_TERM_COLUMN, DEFAULT_REPLACEMENT_COLUMN);
        assert!(SynonymMap::load(None, &columns).unwrap().is_none());
    }
}
