//! CSV row layouts and the reader that turns one dictionary file into entries.
//!
//! Two layouts are supported:
//!
//! ```csv
//! NYC,city
//! Shanghai,city,wiki
//! ```
//!
//! for [`RowLayout::Positional`] (term, label, optional origin), and
//!
//! ```csv
//! cleaned_name,domain,direct,From
//! Weather Today,app,T,store
//! ```
//!
//! for [`RowLayout::Named`], where the header names are configuration.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryEntry;
use crate::error::{NerdictError, Result};

/// Default value of the direct-match column that marks a row as direct.
pub const DEFAULT_DIRECT_MARKER: &str = "T";

/// How the rows of a dictionary file map onto entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum RowLayout {
    /// Headerless rows: term, label and an optional origin, by position.
    #[default]
    Positional,
    /// A header row names the columns to read.
    Named(ColumnNames),
}

/// Header names selecting the columns of a [`RowLayout::Named`] file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Column holding the term (canonical name)
    pub term: String,
    /// Column holding the label
    pub label: String,
    /// Column holding the direct-match flag
    pub direct: Option<String>,
    /// Column holding the origin of the row
    pub origin: Option<String>,
    /// Flag value that marks a row as a direct match
    pub direct_marker: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            term: "term".to_string(),
            label: "label".to_string(),
            direct: None,
            origin: None,
            direct_marker: DEFAULT_DIRECT_MARKER.to_string(),
        }
    }
}

impl ColumnNames {
    /// Select the term and label columns by header name.
    pub fn new<T: Into<String>, L: Into<String>>(term: T, label: L) -> Self {
        ColumnNames {
            term: term.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Read the direct-match flag from the given column.
    pub fn with_direct<S: Into<String>>(mut self, column: S) -> Self {
        self.direct = Some(column.into());
        self
    }

    /// Read the origin from the given column.
    pub fn with_origin<S: Into<String>>(mut self, column: S) -> Self {
        self.origin = Some(column.into());
        self
    }

    /// Use a different flag value for direct-match rows.
    pub fn with_direct_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.direct_marker = marker.into();
        self
    }
}

/// Column indexes resolved against the header of one file.
struct NamedIndexes {
    term: usize,
    label: usize,
    direct: Option<usize>,
    origin: Option<usize>,
}

/// Read every row of the CSV file at `path` into entries.
///
/// Any row that does not fit the layout fails the whole file.
pub fn read_entries(path: &Path, layout: &RowLayout) -> Result<Vec<DictionaryEntry>> {
    let file = File::open(path).map_err(|e| NerdictError::path_unreadable(path, e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(matches!(layout, RowLayout::Named(_)))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let indexes = match layout {
        RowLayout::Positional => None,
        RowLayout::Named(columns) => {
            let headers = reader
                .headers()
                .map_err(|e| csv_error(path, e))?
                .clone();
            Some(resolve_columns(path, &headers, columns)?)
        }
    };

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let entry = match (&indexes, layout) {
            (Some(indexes), RowLayout::Named(columns)) => {
                named_entry(path, line, &record, indexes, columns)?
            }
            _ => positional_entry(path, line, &record)?,
        };
        entries.push(entry);
    }

    Ok(entries)
}

fn positional_entry(path: &Path, line: u64, record: &StringRecord) -> Result<DictionaryEntry> {
    if record.len() < 2 {
        return Err(NerdictError::malformed_row(
            path,
            line,
            format!("expected at least 2 columns, found {}", record.len()),
        ));
    }

    let mut entry = DictionaryEntry::new(&record[0], &record[1]);
    if let Some(origin) = record.get(2).filter(|o| !o.is_empty()) {
        entry = entry.with_origin(origin);
    }
    Ok(entry)
}

fn named_entry(
    path: &Path,
    line: u64,
    record: &StringRecord,
    indexes: &NamedIndexes,
    columns: &ColumnNames,
) -> Result<DictionaryEntry> {
    let field = |index: usize, name: &str| {
        record.get(index).ok_or_else(|| {
            NerdictError::malformed_row(path, line, format!("missing value for column '{name}'"))
        })
    };

    let mut entry = DictionaryEntry::new(
        field(indexes.term, columns.term.as_str())?,
        field(indexes.label, columns.label.as_str())?,
    );

    if let (Some(index), Some(name)) = (indexes.direct, &columns.direct) {
        entry.direct = field(index, name.as_str())? == columns.direct_marker;
    }
    if let (Some(index), Some(name)) = (indexes.origin, &columns.origin) {
        let origin = field(index, name.as_str())?;
        if !origin.is_empty() {
            entry = entry.with_origin(origin);
        }
    }

    Ok(entry)
}

fn resolve_columns(path: &Path, headers: &StringRecord, columns: &ColumnNames) -> Result<NamedIndexes> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| {
                NerdictError::malformed_row(path, 1, format!("header has no column '{name}'"))
            })
    };

    Ok(NamedIndexes {
        term: find(columns.term.as_str())?,
        label: find(columns.label.as_str())?,
        direct: columns.direct.as_deref().map(find).transpose()?,
        origin: columns.origin.as_deref().map(find).transpose()?,
    })
}

fn csv_error(path: &Path, error: csv::Error) -> NerdictError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    let reason = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(e) => NerdictError::path_unreadable(path, e),
        _ => NerdictError::malformed_row(path, line, reason),
    }
}
