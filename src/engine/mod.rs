//! Packaging engine module
//!
//! Runs one batch through evaluate, split, manifest, package and report.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PackageEngine` - drives the stages for one batch
//! - `PackageReport` - what the run produced
//!
//! Any error aborts the run. Nothing is rolled back: split parts, the
//! manifest and earlier archives stay on disk and the caller cleans the
//! directory before retrying.

mod types;

pub use types::PackageReport;

use crate::archive::{archive_file_name, ArchiveLayout, ArchiveMember, ArchivePackager};
use crate::batch::list_files;
use crate::config::PackageConfig;
use crate::error::{Error, Result};
use crate::manifest::{BatchIdentity, ManifestBuilder};
use crate::split::{RecordSplitter, SplitOutcome, ThresholdEvaluator};
use crate::types::{Stage, MANIFEST_FILE_NAME};
use std::path::{Path, PathBuf};

/// Drives a packaging run for one batch directory
pub struct PackageEngine {
    /// Run configuration
    config: PackageConfig,
    /// Uuid and timestamp shared by everything this run writes
    identity: BatchIdentity,
}

impl PackageEngine {
    /// Create an engine with a freshly generated identity
    pub fn new(config: PackageConfig) -> Self {
        Self::with_identity(config, BatchIdentity::generate())
    }

    /// Create an engine with a known identity
    pub fn with_identity(config: PackageConfig, identity: BatchIdentity) -> Self {
        Self { config, identity }
    }

    /// Get the configuration
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Get the run identity
    pub fn identity(&self) -> &BatchIdentity {
        &self.identity
    }

    /// Run every stage and return what was produced
    pub fn run(&self) -> Result<PackageReport> {
        self.config.validate()?;
        let batch_dir = self.config.batch_dir.as_path();

        tracing::info!(stage = %Stage::Evaluate, dir = %batch_dir.display(), "Starting");
        let oversized = ThresholdEvaluator::new(self.config.max_bytes).is_oversized(batch_dir)?;
        let layout = ArchiveLayout::for_batch(oversized);

        let splits = if oversized {
            tracing::info!(stage = %Stage::Split, "Batch exceeds threshold");
            self.split_oversized(batch_dir)?
        } else {
            Vec::new()
        };

        tracing::info!(stage = %Stage::BuildManifest, "Rendering manifest");
        let (_, manifest) = ManifestBuilder::new(self.identity, self.config.cluster_id.clone())
            .with_mode(self.config.create_mode())
            .write(batch_dir)?;

        tracing::info!(stage = %Stage::Package, layout = ?layout, "Writing archives");
        let batch_dir = batch_dir
            .canonicalize()
            .map_err(|e| Error::file_io(batch_dir, e))?;
        let manifest_path = batch_dir.join(MANIFEST_FILE_NAME);
        let archives = match layout {
            ArchiveLayout::PerDataFile => self.package_per_file(&batch_dir, &manifest_path)?,
            ArchiveLayout::WholeBatch => vec![self.package_whole(&batch_dir)?],
        };

        tracing::info!(stage = %Stage::Report, archives = archives.len(), "Packaging complete");
        Ok(PackageReport {
            identity: self.identity,
            oversized,
            layout,
            splits,
            manifest_path,
            manifest,
            archives,
        })
    }

    /// Split every file at or above the threshold
    fn split_oversized(&self, batch_dir: &Path) -> Result<Vec<SplitOutcome>> {
        let splitter = RecordSplitter::new(self.config.max_bytes)
            .with_max_parts(self.config.max_parts)
            .with_mode(self.config.create_mode());

        let mut outcomes = Vec::new();
        for entry in list_files(batch_dir)? {
            if entry.name == MANIFEST_FILE_NAME || !splitter.needs_split(entry.size) {
                continue;
            }
            outcomes.push(splitter.split(&entry.path)?);
        }
        Ok(outcomes)
    }

    /// One archive per data file, each bundled with the manifest
    fn package_per_file(&self, batch_dir: &Path, manifest_path: &Path) -> Result<Vec<PathBuf>> {
        let packager = self.packager();
        let out_dir = archive_dir(batch_dir)?;

        let data_files = list_files(batch_dir)?.into_iter().filter(|e| {
            e.name != MANIFEST_FILE_NAME && e.has_extension(&self.config.data_extension)
        });

        let mut archives = Vec::new();
        for (index, entry) in data_files.enumerate() {
            let archive_path =
                out_dir.join(archive_file_name(&self.config.archive_prefix, Some(index)));
            let members = [
                ArchiveMember::in_batch(batch_dir, &entry.path),
                ArchiveMember::in_batch(batch_dir, manifest_path),
            ];
            archives.push(packager.write_archive(&archive_path, &members)?);
        }
        Ok(archives)
    }

    /// A single archive holding the whole batch directory
    fn package_whole(&self, batch_dir: &Path) -> Result<PathBuf> {
        let archive_path =
            archive_dir(batch_dir)?.join(archive_file_name(&self.config.archive_prefix, None));
        self.packager()
            .write_archive(&archive_path, &[ArchiveMember::in_batch(batch_dir, batch_dir)])
    }

    fn packager(&self) -> ArchivePackager {
        let packager = ArchivePackager::new().with_mode(self.config.create_mode());
        match self.config.compression_level {
            Some(level) => packager.with_compression_level(level),
            None => packager,
        }
    }
}

/// Archives are written next to the batch directory
fn archive_dir(batch_dir: &Path) -> Result<&Path> {
    batch_dir.parent().ok_or_else(|| {
        Error::config(format!(
            "Batch directory {} has no parent to write archives into",
            batch_dir.display()
        ))
    })
}

/// Convenience wrapper: run a batch with a fresh identity
pub fn package_batch(config: PackageConfig) -> Result<PackageReport> {
    PackageEngine::new(config).run()
}
