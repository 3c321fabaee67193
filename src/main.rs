//! Korekuta packaging CLI
//!
//! Packages a batch of usage reports for upload. Exits 0 on success and 2
//! on any fatal error.

use clap::Parser;
use korekuta_packager::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(cli.log_level().into())
                .from_env_lossy(),
        )
        .init();

    let runner = Runner::new(cli);
    if let Err(e) = runner.run() {
        tracing::error!("Fatal error: {e}");
        std::process::exit(e.exit_code());
    }
}
