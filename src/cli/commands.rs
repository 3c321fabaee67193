//! CLI arguments and parsing

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

/// Severity ladder selected by repeated `-v`
const VERBOSITY_LEVELS: [Level; 4] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG];

/// Korekuta CSV file packaging
///
/// Splits oversized report files, writes `manifest.json` and bundles the
/// batch into `.tar.gz` archives. Prints one archive path per line.
#[derive(Parser, Debug)]
#[command(name = "korekuta-package")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the batch directory to package
    #[arg(short = 'f', long = "filepath")]
    pub filepath: PathBuf,

    /// Cluster identifier written into the manifest
    #[arg(long = "ocp-cluster-id", visible_alias = "cluster-id")]
    pub cluster_id: String,

    /// Maximum size of packages in MiB [default: 100]
    #[arg(short = 's', long = "max-size")]
    pub max_size: Option<u64>,

    /// Overwrite existing files instead of failing
    #[arg(short = 'o', long)]
    pub overwrite: bool,

    /// Increase verbosity (up to -vvv)
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count)]
    pub verbosity: u8,

    /// Packaging profile (YAML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log level for the requested verbosity
    pub fn log_level(&self) -> Level {
        level_for_verbosity(self.verbosity)
    }
}

/// Map a `-v` count to a level, saturating at debug
pub fn level_for_verbosity(count: u8) -> Level {
    let index = usize::from(count).min(VERBOSITY_LEVELS.len() - 1);
    VERBOSITY_LEVELS[index]
}
