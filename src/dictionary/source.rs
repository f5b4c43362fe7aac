//! Resolution of a configured dictionary path into the files to read.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{NerdictError, Result};

/// Resolve an optional dictionary path into the list of files it names.
///
/// - `None` means nothing is configured and yields `Ok(None)`.
/// - A directory yields every regular file directly inside it, sorted by name.
///   Symbolic links are followed. Hidden entries (names starting with `.`) are
///   skipped.
/// - A file yields just that file.
///
/// A configured path that does not exist or cannot be listed is an error.
/// `kind` names the dictionary in log lines ("NER", "synonym", ...).
pub fn resolve_paths(path: Option<&Path>, kind: &str) -> Result<Option<Vec<PathBuf>>> {
    let Some(path) = path else {
        info!("No {kind} dictionary found");
        return Ok(None);
    };

    let metadata =
        fs::metadata(path).map_err(|e| NerdictError::path_unreadable(path, e))?;

    if !metadata.is_dir() {
        return Ok(Some(vec![path.to_path_buf()]));
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(path).map_err(|e| NerdictError::path_unreadable(path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| NerdictError::path_unreadable(path, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let file = entry.path();
        let metadata = fs::metadata(&file).map_err(|e| NerdictError::path_unreadable(&file, e))?;
        if metadata.is_file() {
            files.push(file);
        }
    }
    files.sort();

    if files.is_empty() {
        info!("No {kind} dictionary found in {}", path.display());
    }

    Ok(Some(files))
}
