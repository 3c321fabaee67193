//! Batch directory listing
//!
//! A batch is a flat directory of report files. Only regular files are
//! members; sub-directories and other entries are skipped. Listings are
//! sorted by file name so every stage sees the same order.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A regular file in the batch directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// File name (no directory component)
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// On-disk size in bytes
    pub size: u64,
}

impl BatchEntry {
    /// Whether the file extension matches `extension` (case-insensitive)
    pub fn has_extension(&self, extension: &str) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// List the regular files of `dir`, sorted by name
pub fn list_files(dir: impl AsRef<Path>) -> Result<Vec<BatchEntry>> {
    let dir = dir.as_ref();
    let read_dir = fs::read_dir(dir).map_err(|e| Error::file_io(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| Error::file_io(dir, e))?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| Error::file_io(&path, e))?;
        if !metadata.is_file() {
            tracing::debug!(path = %path.display(), "Skipping non-file batch entry");
            continue;
        }

        entries.push(BatchEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            size: metadata.len(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// List the file names of `dir`, sorted
pub fn list_file_names(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    Ok(list_files(dir)?.into_iter().map(|e| e.name).collect())
}
