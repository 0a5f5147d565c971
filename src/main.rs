//! Pairs Duel - Unified CLI
//!
//! Plays a round of pairs in the terminal, or prints a deal for a seed.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use pairs_core::{GameSession, clock_seed};
use pairs_duel::{GameConfig, format_layout, run_tui};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The log file itself is configurable, so logging starts after loading.
    let (config, source) = GameConfig::load_with_source(&cli.config)?;
    let config = config.with_overrides(cli.rows, cli.cols, cli.seed, cli.log_file.clone())?;
    init_tracing(config.log_file())?;
    debug!(?cli, "Parsed command line");
    info!(%source, ?config, "Configuration resolved");

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_tui(config).await,
        Command::Deal => print_deal(&config),
    }
}

/// Logs go to a file so they do not tear the alternate screen.
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Print the layout dealt for the configured (or a fresh) seed.
fn print_deal(config: &GameConfig) -> Result<()> {
    let seed = config.seed().unwrap_or_else(clock_seed);
    let session = GameSession::new(config.grid()?, config.timing(), seed);
    info!(seed, "Printing deal");

    println!("Seed: {}", seed);
    println!("{}", format_layout(session.board()));
    Ok(())
}
