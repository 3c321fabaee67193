//! Manifest rendering
//!
//! Lists the batch directory after any splitting and writes the manifest
//! into it through the shared creation primitive.

use super::types::{BatchIdentity, Manifest};
use crate::batch::list_file_names;
use crate::error::{Error, Result};
use crate::output::{create_file, CreateMode};
use crate::types::MANIFEST_FILE_NAME;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Builds and writes `manifest.json` for a batch
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    identity: BatchIdentity,
    cluster_id: String,
    mode: CreateMode,
}

impl ManifestBuilder {
    /// Create a builder for `cluster_id` using the run identity
    pub fn new(identity: BatchIdentity, cluster_id: impl Into<String>) -> Self {
        Self {
            identity,
            cluster_id: cluster_id.into(),
            mode: CreateMode::default(),
        }
    }

    /// Set the manifest creation mode
    #[must_use]
    pub fn with_mode(mut self, mode: CreateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Path of the manifest inside `dir`
    pub fn manifest_path(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE_NAME)
    }

    /// Render the manifest for the current contents of `dir`
    ///
    /// The manifest file itself is never listed.
    pub fn build(&self, dir: &Path) -> Result<Manifest> {
        let files = if dir.exists() {
            list_file_names(dir)?
                .into_iter()
                .filter(|name| name != MANIFEST_FILE_NAME)
                .collect()
        } else {
            Vec::new()
        };

        let manifest = Manifest::new(&self.identity, self.cluster_id.clone(), files);
        tracing::debug!(manifest = ?manifest, "rendered manifest");
        Ok(manifest)
    }

    /// Render and write the manifest, creating `dir` if needed
    pub fn write(&self, dir: &Path) -> Result<(PathBuf, Manifest)> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| Error::file_io(dir, e))?;
            tracing::info!(dir = %dir.display(), "Created dirs");
        }

        let manifest = self.build(dir)?;
        let path = Self::manifest_path(dir);

        let file = create_file(&path, self.mode)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &manifest)?;
        writer.flush().map_err(|e| Error::file_io(&path, e))?;

        tracing::info!(path = %path.display(), files = manifest.files.len(), "manifest generated");
        Ok((path, manifest))
    }
}
