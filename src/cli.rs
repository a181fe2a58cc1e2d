//! Command-line interface for strictly_hanoi.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hanoi - Towers of Hanoi with undo/redo and session replay
#[derive(Parser, Debug)]
#[command(name = "strictly_hanoi")]
#[command(about = "Towers of Hanoi with reversible history and log replay", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "hanoi.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, recording a session log
    Play {
        /// Session log path (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Do not record a session log
        #[arg(long)]
        no_log: bool,

        /// Draw without ANSI colours
        #[arg(long)]
        no_color: bool,
    },

    /// Replay a recorded session log
    Replay {
        /// Session log path (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Do not draw the board after each step
        #[arg(long)]
        quiet_replay: bool,

        /// Print the final state as JSON instead of drawing it
        #[arg(long)]
        json: bool,

        /// Draw without ANSI colours
        #[arg(long)]
        no_color: bool,
    },
}
