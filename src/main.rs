//! Strictly Hanoi - CLI
//!
//! Interactive play and session replay.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_hanoi::{
    AnsiRenderer, GameEngine, GameRunner, HanoiConfig, HistoryManager, Replayer, SessionLog,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HanoiConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play {
            log,
            no_log,
            no_color,
        } => run_play(config, log, no_log, no_color),
        Command::Replay {
            log,
            quiet_replay,
            json,
            no_color,
        } => run_replay(config, log, quiet_replay, json, no_color),
    }
}

/// Play interactively on stdin/stdout
#[instrument(skip(config))]
fn run_play(
    config: HanoiConfig,
    log: Option<PathBuf>,
    no_log: bool,
    no_color: bool,
) -> Result<()> {
    initialize_tracing("warn");

    let color = *config.color() && !no_color;
    let mut manager = HistoryManager::new(GameEngine::new(config.bounds()))
        .with_renderer(AnsiRenderer::stdout(color));

    if *config.use_log() && !no_log {
        let path = log.unwrap_or_else(|| config.log_path().clone());
        let session_log = SessionLog::open(&path)
            .with_context(|| format!("Cannot record session to {}", path.display()))?;
        manager = manager.with_log(session_log);
    }

    let stdin = std::io::stdin();
    let mut runner = GameRunner::new(stdin.lock(), std::io::stdout(), manager, color);
    let outcome = runner.run()?;
    info!(?outcome, "Game over");
    Ok(())
}

/// Replay a session log
#[instrument(skip(config))]
fn run_replay(
    config: HanoiConfig,
    log: Option<PathBuf>,
    quiet_replay: bool,
    json: bool,
    no_color: bool,
) -> Result<()> {
    initialize_tracing("info,strictly_hanoi=debug");

    let color = *config.color() && !no_color;
    let show_moves = *config.show_replay_moves() && !quiet_replay && !json;
    let path = log.unwrap_or_else(|| config.log_path().clone());

    // No session log attached: replay must never rewrite the file it reads
    let mut manager = HistoryManager::new(GameEngine::new(config.bounds()))
        .with_renderer(AnsiRenderer::stdout(color));

    let report = Replayer::from_path(&path)
        .and_then(|replayer| replayer.with_show_moves(show_moves).run(&mut manager))
        .with_context(|| format!("Replay of {} failed", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manager.snapshot())?);
    } else if !show_moves {
        manager.show()?;
    }

    info!(?report, completed = manager.engine().is_completed(), "Replay complete");
    Ok(())
}

fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
