//! Split result types

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One size-bounded file produced from a source file
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPart {
    /// Part number, starting at 1
    pub number: usize,
    /// Path of the part file
    pub path: PathBuf,
    /// Data rows written (header excluded)
    pub rows: u64,
    /// Cumulative size estimate of the data rows
    pub estimated_bytes: f64,
}

/// Result of splitting a single source file
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// The source file (removed once all parts were written)
    pub source: PathBuf,
    /// Parts in order
    pub parts: Vec<SplitPart>,
    /// Whether the part cap stopped the split before the source was drained
    pub capped: bool,
}

impl SplitOutcome {
    /// Total data rows written across all parts
    pub fn total_rows(&self) -> u64 {
        self.parts.iter().map(|p| p.rows).sum()
    }

    /// Paths of all parts in order
    pub fn part_paths(&self) -> Vec<&Path> {
        self.parts.iter().map(|p| p.path.as_path()).collect()
    }
}

/// Path of part `number` for `source`: `<stem>_<number><.ext>`
///
/// `reports/usage.2020.csv` part 3 becomes `reports/usage.2020_3.csv`.
pub fn part_path(source: &Path, number: usize) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = source.file_stem() {
        name.push(stem);
    }
    name.push(format!("_{number}"));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}
