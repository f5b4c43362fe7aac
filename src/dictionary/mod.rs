//! Entity dictionaries loaded from CSV files.
//!
//! A dictionary is an ordered list of `(term, label)` entries read from a single
//! file or from every file in a directory. Entries are never deduplicated: the
//! same term may appear under several labels, and every one of them matches.
//!
//! # Examples
//!
//! ```
//! use nerdict::dictionary::{Dictionary, DictionaryEntry};
//!
//! let dictionary = Dictionary::from_entries(vec![
//!     DictionaryEntry::new("NYC", "city"),
//!     DictionaryEntry::new("NY", "city"),
//! ]);
//! assert_eq!(dictionary.len(), 2);
//! ```

pub mod reader;
pub mod source;

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use reader::{ColumnNames, RowLayout};
pub use source::resolve_paths;

/// One row of a dictionary file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Surface form (or canonical name) to match
    pub term: String,
    /// Entity label assigned on a match
    pub label: String,
    /// Where the row came from, when the file tracks it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Whether the row takes part in whole-text matching
    #[serde(default)]
    pub direct: bool,
}

impl DictionaryEntry {
    /// Create an entry without origin that does not take part in whole-text matching.
    pub fn new<T: Into<String>, L: Into<String>>(term: T, label: L) -> Self {
        DictionaryEntry {
            term: term.into(),
            label: label.into(),
            origin: None,
            direct: false,
        }
    }

    /// Set the origin of this entry.
    pub fn with_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Mark this entry as a direct (whole-text) match.
    pub fn with_direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }
}

/// An immutable, ordered collection of dictionary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    /// Build a dictionary from entries already in memory.
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        Dictionary { entries }
    }

    /// Load a dictionary from a file or a directory of files.
    ///
    /// Returns `Ok(None)` when `path` is `None`: no dictionary is configured,
    /// which is not an error. A configured path that cannot be read, or a file
    /// with a malformed row, fails the whole load.
    pub fn load(path: Option<&Path>, layout: &RowLayout) -> Result<Option<Self>> {
        let Some(files) = resolve_paths(path, "NER")? else {
            return Ok(None);
        };

        let mut entries = Vec::new();
        for file in &files {
            info!("Loading NER dictionary at {}", file.display());
            entries.extend(reader::read_entries(file, layout)?);
        }

        Ok(Some(Dictionary { entries }))
    }

    /// All entries in load order.
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Iterate over the entries in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
