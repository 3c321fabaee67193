//! Scoped file creation
//!
//! One primitive shared by every writer in the crate: part files, the
//! manifest and archives all go through [`create_file`], so the
//! fail-instead-of-overwrite policy lives in exactly one place.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

/// How an output file is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateMode {
    /// Create a new file, failing if one already exists (default)
    #[default]
    Exclusive,
    /// Create the file, truncating any existing one
    Overwrite,
}

impl CreateMode {
    /// Map the overwrite flag to a creation mode
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            Self::Overwrite
        } else {
            Self::Exclusive
        }
    }

    /// Whether existing files are replaced
    pub fn overwrites(self) -> bool {
        matches!(self, Self::Overwrite)
    }
}

/// Open `path` for writing according to `mode`
///
/// An existing file under [`CreateMode::Exclusive`] yields
/// [`Error::Collision`]; any other failure is reported as
/// [`Error::FileIo`] carrying the path. The existence check is the
/// `O_EXCL` open itself, not a separate `exists()` check.
pub fn create_file(path: impl AsRef<Path>, mode: CreateMode) -> Result<File> {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    options.write(true);

    match mode {
        CreateMode::Exclusive => options.create_new(true),
        CreateMode::Overwrite => options.create(true).truncate(true),
    };

    options.open(path).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            Error::collision(path)
        } else {
            Error::file_io(path, e)
        }
    })
}
