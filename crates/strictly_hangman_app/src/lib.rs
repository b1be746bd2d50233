//! Strictly Hangman front ends
//!
//! - **Terminal**: menu and turn loop over any reader/writer, with pause and resume
//! - **HTTP**: JSON API serving many concurrent games
//! - **Config**: TOML configuration shared by both
//!
//! All game rules live in the `strictly_hangman` crate; this crate only
//! moves input and output around them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod http;
mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - HTTP server
pub use http::{
    ApiError, AppState, CreateGameRequest, CreatedGame, GameView, GuessRequest, router, serve,
};

// Crate-level exports - Terminal
pub use terminal::{GameEnd, STOP_COMMAND, TerminalGame};
