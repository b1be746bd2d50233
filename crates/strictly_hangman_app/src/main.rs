//! Strictly Hangman - Unified CLI
//!
//! Play in the terminal or serve games over HTTP.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_hangman::{ScoreBoard, ScoreStore, WordBank};
use strictly_hangman_app::{GameConfig, TerminalGame};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)?.with_scores_path(cli.scores);

    match cli.command {
        Command::Play { resume } => {
            init_tracing("warn");
            run_terminal(config, resume)
        }
        Command::Http { port, host } => {
            init_tracing("info,strictly_hangman=debug,strictly_hangman_app=debug");
            strictly_hangman_app::serve(config.with_bind(host, port)).await
        }
        Command::Scores => {
            init_tracing("warn");
            print_scores(&config)
        }
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the terminal game
#[instrument(skip(config))]
fn run_terminal(config: GameConfig, resume: Option<PathBuf>) -> Result<()> {
    let bank = WordBank::load(config.words_path(), config.stages_path())
        .context("Could not load the word list or the hangman drawings")?;
    let scores = ScoreStore::new(config.scores_path());

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut game = TerminalGame::new(bank, scores, config.save_path(), stdin, stdout);

    match resume {
        Some(path) => {
            info!(path = %path.display(), "Resuming game");
            game.resume(path)?;
        }
        None => game.run()?,
    }
    Ok(())
}

/// Print the scoreboard
fn print_scores(config: &GameConfig) -> Result<()> {
    let board = ScoreBoard::load(config.scores_path())?;
    for score in board.ranked() {
        println!("{}: {}", score.name(), score.score());
    }
    Ok(())
}
