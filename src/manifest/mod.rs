//! Manifest module
//!
//! Describes the final file set of a batch.
//!
//! # Overview
//!
//! The manifest module provides:
//! - `BatchIdentity` - uuid and timestamp fixed for one run
//! - `Manifest` - the serialized descriptor
//! - `ManifestBuilder` - lists the batch and writes `manifest.json`

mod builder;
mod types;

pub use builder::ManifestBuilder;
pub use types::{BatchIdentity, Manifest, MANIFEST_DATE_FORMAT};

#[cfg(test)]
mod tests;
