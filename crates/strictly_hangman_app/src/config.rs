//! Game configuration: where the data files live and where the server binds.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Paths and server settings shared by both front ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Word list, one word per line.
    words_path: PathBuf,

    /// Hangman drawings.
    stages_path: PathBuf,

    /// Score file (JSON).
    scores_path: PathBuf,

    /// Where the terminal game is saved on `STOP`.
    save_path: PathBuf,

    /// Address the HTTP server binds to.
    host: String,

    /// Port the HTTP server binds to.
    port: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("data/words.txt"),
            stages_path: PathBuf::from("data/hangman.txt"),
            scores_path: PathBuf::from("scores.json"),
            save_path: PathBuf::from("save.json"),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(words = %config.words_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the server bind address.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Overrides the score file.
    pub fn with_scores_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.scores_path = path;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
