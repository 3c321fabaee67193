//! Engine types
//!
//! The report of a finished packaging run.

use crate::archive::ArchiveLayout;
use crate::manifest::{BatchIdentity, Manifest};
use crate::split::SplitOutcome;
use std::path::PathBuf;

/// Everything a packaging run produced
#[derive(Debug, Clone)]
pub struct PackageReport {
    /// Identity written into the manifest
    pub identity: BatchIdentity,
    /// Whether the batch was treated as oversized
    pub oversized: bool,
    /// Archive layout that was used
    pub layout: ArchiveLayout,
    /// One entry per file that was split
    pub splits: Vec<SplitOutcome>,
    /// Path of the written manifest
    pub manifest_path: PathBuf,
    /// Manifest contents
    pub manifest: Manifest,
    /// Absolute archive paths in creation order
    pub archives: Vec<PathBuf>,
}

impl PackageReport {
    /// Number of part files created across all splits
    pub fn part_count(&self) -> usize {
        self.splits.iter().map(|s| s.parts.len()).sum()
    }

    /// Whether any split stopped at the part cap
    pub fn any_capped(&self) -> bool {
        self.splits.iter().any(|s| s.capped)
    }
}
