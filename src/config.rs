//! Packaging configuration
//!
//! `PackageConfig` is the resolved runtime configuration for one run.
//! `PackageProfile` is the optional YAML file that supplies defaults for
//! everything except the batch directory and cluster id.

use crate::error::{Error, Result, ResultExt};
use crate::output::CreateMode;
use crate::types::{
    DEFAULT_ARCHIVE_PREFIX, DEFAULT_DATA_EXTENSION, DEFAULT_MAX_PARTS, DEFAULT_MAX_SIZE_MIB,
    MEGABYTE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Runtime Config
// ============================================================================

/// Resolved configuration for a packaging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// Batch directory
    pub batch_dir: PathBuf,

    /// Source cluster identifier
    pub cluster_id: String,

    /// Size threshold in bytes
    pub max_bytes: u64,

    /// Replace existing outputs instead of failing
    pub overwrite: bool,

    /// Extension of data files that get their own archive
    pub data_extension: String,

    /// Archive file name prefix
    pub archive_prefix: String,

    /// Maximum parts per split source
    pub max_parts: usize,

    /// Gzip level (0-9), `None` for the library default
    pub compression_level: Option<u32>,
}

impl PackageConfig {
    /// Create a config with defaults for everything but the inputs
    pub fn new(batch_dir: impl Into<PathBuf>, cluster_id: impl Into<String>) -> Self {
        Self {
            batch_dir: batch_dir.into(),
            cluster_id: cluster_id.into(),
            max_bytes: DEFAULT_MAX_SIZE_MIB * MEGABYTE,
            overwrite: false,
            data_extension: DEFAULT_DATA_EXTENSION.to_string(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            max_parts: DEFAULT_MAX_PARTS,
            compression_level: None,
        }
    }

    /// Set the threshold in MiB
    #[must_use]
    pub fn with_max_size_mib(mut self, mib: u64) -> Self {
        self.max_bytes = mib.saturating_mul(MEGABYTE);
        self
    }

    /// Set the threshold in bytes
    #[must_use]
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Enable or disable overwriting existing outputs
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the data file extension
    #[must_use]
    pub fn with_data_extension(mut self, extension: impl Into<String>) -> Self {
        self.data_extension = extension.into();
        self
    }

    /// Set the archive prefix
    #[must_use]
    pub fn with_archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    /// Set the part cap
    #[must_use]
    pub fn with_max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = max_parts;
        self
    }

    /// Set the gzip level
    #[must_use]
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Apply profile values; fields set on the profile replace defaults
    #[must_use]
    pub fn with_profile(mut self, profile: &PackageProfile) -> Self {
        if let Some(mib) = profile.max_size_mib {
            self = self.with_max_size_mib(mib);
        }
        if let Some(overwrite) = profile.overwrite {
            self.overwrite = overwrite;
        }
        if let Some(ext) = &profile.data_extension {
            self.data_extension.clone_from(ext);
        }
        if let Some(prefix) = &profile.archive_prefix {
            self.archive_prefix.clone_from(prefix);
        }
        if let Some(max_parts) = profile.max_parts {
            self.max_parts = max_parts;
        }
        if profile.compression_level.is_some() {
            self.compression_level = profile.compression_level;
        }
        self
    }

    /// Creation mode implied by the overwrite flag
    pub fn create_mode(&self) -> CreateMode {
        CreateMode::from_overwrite(self.overwrite)
    }

    /// Check values before a run
    pub fn validate(&self) -> Result<()> {
        if self.cluster_id.trim().is_empty() {
            return Err(Error::invalid_value("cluster_id", "must not be empty"));
        }
        if self.max_bytes == 0 {
            return Err(Error::invalid_value("max_size", "must be greater than zero"));
        }
        if self.max_parts == 0 {
            return Err(Error::invalid_value("max_parts", "must be greater than zero"));
        }
        if self.archive_prefix.is_empty() || self.archive_prefix.contains('/') {
            return Err(Error::invalid_value(
                "archive_prefix",
                "must be a non-empty file name",
            ));
        }
        if self.data_extension.is_empty() {
            return Err(Error::invalid_value("data_extension", "must not be empty"));
        }
        if let Some(level) = self.compression_level {
            if level > 9 {
                return Err(Error::invalid_value(
                    "compression_level",
                    format!("{level} is outside 0-9"),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Profile File
// ============================================================================

/// Packaging defaults loaded from YAML
///
/// ```yaml
/// max_size_mib: 50
/// overwrite: false
/// data_extension: csv
/// archive_prefix: korekuta
/// max_parts: 1000
/// compression_level: 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageProfile {
    /// Threshold in MiB
    #[serde(default)]
    pub max_size_mib: Option<u64>,

    /// Replace existing outputs
    #[serde(default)]
    pub overwrite: Option<bool>,

    /// Data file extension
    #[serde(default)]
    pub data_extension: Option<String>,

    /// Archive prefix
    #[serde(default)]
    pub archive_prefix: Option<String>,

    /// Part cap
    #[serde(default)]
    pub max_parts: Option<usize>,

    /// Gzip level
    #[serde(default)]
    pub compression_level: Option<u32>,
}

impl PackageProfile {
    /// Parse a profile from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a profile from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid profile {}", path.display()))
    }
}
