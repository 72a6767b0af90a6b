mod cli;
mod config;
mod store;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, CliError};
use crate::config::AppConfig;
use crate::store::FileStorage;

fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env: {e}");
        }
    }

    // Stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?.with_overrides(cli.store, cli.key_prefix)?;
    let storage = FileStorage::open(&config.store_path)?;
    tracing::debug!(store = %storage.path().display(), prefix = %config.key_prefix, "store opened");

    let stdout = io::stdout();
    cli::run(cli.command, &storage, &config.key_prefix, &mut stdout.lock())
}
