//! tokenstash - inspect and seed a cached authentication token
//!
//! Reads, writes and clears the JSON token file used by the library's
//! `FileTokenCache`. Set `RUST_LOG=debug` to see cache activity on stderr.

use std::io;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tokenstash::cli::{Cli, CliError, StartupConfig};
use tokenstash::commands;

/// Installs a stderr log subscriber filtered by `RUST_LOG` (default `warn`)
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = StartupConfig::from_cli(cli)?;
    debug!(path = %config.token_path.display(), "Resolved token file");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &config, &mut out, io::stdin().lock())
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("tokenstash: {}", e);
        process::exit(1);
    }
}
