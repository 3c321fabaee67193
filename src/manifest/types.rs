//! Manifest types
//!
//! These types are serialized to `manifest.json` and read by the upload
//! side to identify a batch.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Timestamp layout of the manifest `date` field (UTC, no offset)
pub const MANIFEST_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Identity shared by every manifest and archive of one run
///
/// Created once per process; the uuid and timestamp never change after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchIdentity {
    uuid: Uuid,
    generated_at: DateTime<Utc>,
}

impl BatchIdentity {
    /// Generate a fresh random identity stamped with the current time
    pub fn generate() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            generated_at: Utc::now(),
        }
    }

    /// Build an identity from known values
    pub fn from_parts(uuid: Uuid, generated_at: DateTime<Utc>) -> Self {
        Self { uuid, generated_at }
    }

    /// Batch uuid
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Generation time
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Generation time rendered for the manifest
    pub fn date_string(&self) -> String {
        self.generated_at
            .naive_utc()
            .format(MANIFEST_DATE_FORMAT)
            .to_string()
    }
}

/// Descriptor of a batch's final file set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// File names present in the batch directory
    pub files: Vec<String>,
    /// Generation timestamp
    pub date: String,
    /// Batch uuid
    pub uuid: Uuid,
    /// Source cluster
    pub cluster_id: String,
}

impl Manifest {
    /// Create a manifest for `files`
    pub fn new(identity: &BatchIdentity, cluster_id: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            files,
            date: identity.date_string(),
            uuid: identity.uuid(),
            cluster_id: cluster_id.into(),
        }
    }

    /// Read a manifest from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Compact JSON rendering
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
