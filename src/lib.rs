// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # Korekuta report packager
//!
//! Prepares a batch of usage-report files collected from a cluster for
//! upload: oversized CSV files are split into bounded parts, a
//! `manifest.json` describes the batch, and everything is bundled into
//! gzip-compressed tar archives.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use korekuta_packager::{package_batch, PackageConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PackageConfig::new("/tmp/korekuta-collect/cluster-a", "cluster-a")
//!         .with_max_size_mib(100);
//!     let report = package_batch(config)?;
//!     for archive in &report.archives {
//!         println!("{}", archive.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌───────────────┐   ┌─────────┐   ┌────────┐
//! │ Evaluate │ → │ Split?  │ → │ BuildManifest │ → │ Package │ → │ Report │
//! └──────────┘   └─────────┘   └───────────────┘   └─────────┘   └────────┘
//!  threshold      splitter      manifest            archive        stdout
//!                 estimator
//!                      └───────────── output::create_file ──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shared constants and stage names
pub mod types;

/// Runtime configuration and YAML profiles
pub mod config;

/// Batch directory listing
pub mod batch;

/// Collision-aware file creation
pub mod output;

/// Size estimation, splitting and threshold evaluation
pub mod split;

/// Manifest rendering
pub mod manifest;

/// Archive writing
pub mod archive;

/// Packaging run orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{PackageConfig, PackageProfile};
pub use engine::{package_batch, PackageEngine, PackageReport};
pub use error::{Error, Result};
pub use manifest::{BatchIdentity, Manifest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
