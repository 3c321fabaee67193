//! Archive types

use crate::types::ARCHIVE_EXTENSION;
use std::path::{Path, PathBuf};

/// One entry to add to an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// File or directory on disk
    pub source: PathBuf,
    /// Path stored inside the archive
    pub name: PathBuf,
}

impl ArchiveMember {
    /// Member stored as `name`
    pub fn new(source: impl Into<PathBuf>, name: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }

    /// Member stored under `<batch-dir-name>/<file-name>`
    ///
    /// Both archive layouts extract into the same flat batch directory.
    /// A directory source is stored as `<dir-name>` and added recursively.
    pub fn in_batch(batch_dir: &Path, source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let mut name = PathBuf::new();
        if let Some(dir_name) = batch_dir.file_name() {
            name.push(dir_name);
        }
        if source.as_path() != batch_dir {
            if let Some(file_name) = source.file_name() {
                name.push(file_name);
            }
        }
        Self { source, name }
    }
}

/// How a batch is bundled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// One archive holding the whole batch directory
    WholeBatch,
    /// One archive per data file, each with the manifest
    PerDataFile,
}

impl ArchiveLayout {
    /// Layout for a batch that did or did not exceed the threshold
    pub fn for_batch(oversized: bool) -> Self {
        if oversized {
            Self::PerDataFile
        } else {
            Self::WholeBatch
        }
    }
}

/// Archive file name: `<prefix>.tar.gz` or `<prefix>_<index>.tar.gz`
pub fn archive_file_name(prefix: &str, index: Option<usize>) -> String {
    match index {
        Some(index) => format!("{prefix}_{index}.{ARCHIVE_EXTENSION}"),
        None => format!("{prefix}.{ARCHIVE_EXTENSION}"),
    }
}
