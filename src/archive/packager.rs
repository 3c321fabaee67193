//! Gzip-compressed tar writer

use super::types::ArchiveMember;
use crate::error::{Error, Result};
use crate::output::{create_file, CreateMode};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `.tar.gz` archives
#[derive(Debug, Clone)]
pub struct ArchivePackager {
    mode: CreateMode,
    compression: Compression,
}

impl Default for ArchivePackager {
    fn default() -> Self {
        Self {
            mode: CreateMode::default(),
            compression: Compression::default(),
        }
    }
}

impl ArchivePackager {
    /// Create a packager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the archive creation mode
    #[must_use]
    pub fn with_mode(mut self, mode: CreateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the gzip level (0-9)
    #[must_use]
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression = Compression::new(level);
        self
    }

    /// Write `members` in order to a new archive at `archive_path`
    pub fn write_archive(&self, archive_path: &Path, members: &[ArchiveMember]) -> Result<PathBuf> {
        let file = create_file(archive_path, self.mode)?;
        let encoder = GzEncoder::new(BufWriter::new(file), self.compression);
        let mut builder = tar::Builder::new(encoder);

        for member in members {
            tracing::debug!(
                member = %member.source.display(),
                archive = %archive_path.display(),
                "Adding member"
            );
            let added = if member.source.is_dir() {
                builder.append_dir_all(&member.name, &member.source)
            } else {
                builder.append_path_with_name(&member.source, &member.name)
            };
            added.map_err(|e| {
                Error::archive(format!(
                    "Failed to add {} to {}: {e}",
                    member.source.display(),
                    archive_path.display()
                ))
            })?;
        }

        let encoder = builder
            .into_inner()
            .map_err(|e| Error::file_io(archive_path, e))?;
        let mut writer = encoder
            .finish()
            .map_err(|e| Error::file_io(archive_path, e))?;
        writer.flush().map_err(|e| Error::file_io(archive_path, e))?;

        tracing::info!(archive = %archive_path.display(), members = members.len(), "Wrote");
        Ok(archive_path.to_path_buf())
    }
}
