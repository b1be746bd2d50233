//! Command-line interface for strictly_hangman.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hangman - word-guessing game in the terminal or over HTTP
#[derive(Parser, Debug)]
#[command(name = "strictly_hangman")]
#[command(about = "Hangman game with a terminal front end and a JSON game server")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "hangman.toml")]
    pub config: PathBuf,

    /// Override the score file from the configuration
    #[arg(long, global = true)]
    pub scores: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Resume the game saved at this path instead of showing the menu
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Run the HTTP game server
    Http {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the scoreboard
    Scores,
}
