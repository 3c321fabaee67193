//! Archive module
//!
//! Bundles batch files and the manifest into `.tar.gz` archives.
//!
//! # Overview
//!
//! The archive module provides:
//! - `ArchivePackager` - writes one compressed archive from a member list
//! - `ArchiveMember` - source path plus in-archive name
//! - `ArchiveLayout` - whole batch vs. one archive per data file

mod packager;
mod types;

pub use packager::ArchivePackager;
pub use types::{archive_file_name, ArchiveLayout, ArchiveMember};
