//! CLI runner - resolves configuration and executes a packaging run

use crate::cli::commands::Cli;
use crate::config::{PackageConfig, PackageProfile};
use crate::engine::{PackageEngine, PackageReport};
use crate::error::Result;
use std::io::{self, Write};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolve flags and the optional profile into a run configuration
    ///
    /// Flags win over the profile; overwrite is on if either enables it.
    pub fn build_config(&self) -> Result<PackageConfig> {
        let profile = match &self.cli.config {
            Some(path) => PackageProfile::from_file(path)?,
            None => PackageProfile::default(),
        };

        let mut config = PackageConfig::new(&self.cli.filepath, self.cli.cluster_id.clone())
            .with_profile(&profile);
        if let Some(mib) = self.cli.max_size {
            config = config.with_max_size_mib(mib);
        }
        if self.cli.overwrite {
            config = config.with_overwrite(true);
        }

        config.validate()?;
        tracing::debug!(config = ?config, "CLI Args");
        Ok(config)
    }

    /// Run and print archive paths to stdout
    pub fn run(&self) -> Result<PackageReport> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    /// Run and print archive paths, one per line, to `out`
    pub fn run_with_output(&self, out: &mut impl Write) -> Result<PackageReport> {
        let config = self.build_config()?;
        let report = PackageEngine::new(config).run()?;

        for archive in &report.archives {
            writeln!(out, "{}", archive.display())?;
        }
        out.flush()?;

        Ok(report)
    }
}
