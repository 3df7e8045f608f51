use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use timed_cli::commands::{report, restart, start, status, stop, summary};
use timed_cli::{Cli, Commands, Config};
use timed_log::LogStore;

/// Load config and open the log, creating it if necessary.
fn open_log(config_path: Option<&Path>) -> Result<LogStore> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    LogStore::open(&config.log_path).context("failed to open log")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let store = open_log(cli.config.as_deref())?;

    // Read the clock once so every field of one command agrees
    let now = Local::now().naive_local();

    let mut out = io::stdout().lock();
    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => status::run(&mut out, &store, now, cli.quiet)?,
        Commands::Start { project } => start::run(&mut out, &store, &project, now)?,
        Commands::Stop => stop::run(&mut out, &store, now)?,
        Commands::Restart => restart::run(&mut out, &store, now)?,
        Commands::Summary { json } => summary::run(&mut out, &store, now, json)?,
        Commands::Report(args) => report::run(&mut out, &store, args.bucket(), now, args.json)?,
    }

    Ok(())
}
