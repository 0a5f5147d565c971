//! Command-line interface for pairs_duel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pairs Duel - two-player memory matching in the terminal
#[derive(Parser, Debug)]
#[command(name = "pairs_duel")]
#[command(about = "Two-player memory matching game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the game configuration file
    #[arg(short, long, default_value = "pairs_duel.toml", global = true)]
    pub config: PathBuf,

    /// Shuffle seed, for reproducing a deal
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Board rows
    #[arg(long, global = true)]
    pub rows: Option<usize>,

    /// Board columns
    #[arg(long, global = true)]
    pub cols: Option<usize>,

    /// Log file (the terminal is in raw mode while playing)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a game in the terminal
    Play,

    /// Print the dealt layout and exit
    Deal,
}
