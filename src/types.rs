//! Common constants and types used throughout the packager
//!
//! Shared sizing constants and the file names that make up the
//! on-disk contract with the upload side.

use std::fmt;

// ============================================================================
// Sizing
// ============================================================================

/// Bytes in one MiB
pub const MEGABYTE: u64 = 1024 * 1024;

/// Default maximum artifact size in MiB
pub const DEFAULT_MAX_SIZE_MIB: u64 = 100;

/// Upper bound on parts produced from a single source file
pub const DEFAULT_MAX_PARTS: usize = 1000;

// ============================================================================
// Names
// ============================================================================

/// File name of the manifest inside the batch directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Default prefix for archive file names
pub const DEFAULT_ARCHIVE_PREFIX: &str = "korekuta";

/// Default extension of data files eligible for per-file archives
pub const DEFAULT_DATA_EXTENSION: &str = "csv";

/// Extension appended to every archive name
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

// ============================================================================
// Run stages
// ============================================================================

/// Stages of a packaging run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Threshold evaluation of the batch directory
    Evaluate,
    /// Splitting of oversized files
    Split,
    /// Manifest rendering
    BuildManifest,
    /// Archive creation
    Package,
    /// Reporting of archive paths
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Evaluate => "evaluate",
            Stage::Split => "split",
            Stage::BuildManifest => "build_manifest",
            Stage::Package => "package",
            Stage::Report => "report",
        };
        f.write_str(name)
    }
}
