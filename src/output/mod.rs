//! Output module
//!
//! Creation of every file the packager writes.
//!
//! # Overview
//!
//! This module provides:
//! - `CreateMode` - exclusive vs. truncating creation policy
//! - `create_file` - the single collision-aware creation primitive

mod create;

pub use create::{create_file, CreateMode};
