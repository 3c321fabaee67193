//! CLI module
//!
//! Command-line interface for packaging a batch directory.
//!
//! stdout carries only archive paths, one per line; diagnostics go to
//! the log on stderr.

mod commands;
mod runner;

pub use commands::{level_for_verbosity, Cli};
pub use runner::Runner;
