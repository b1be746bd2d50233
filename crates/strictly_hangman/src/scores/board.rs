//! Score records and their JSON file format.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::scores::StoreError;

/// Win count for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Score {
    /// Player name, unique within a board.
    name: String,
    /// Games won.
    score: u32,
}

/// Every player's score, loaded and saved as one unit.
///
/// Serialized as `{ "scores": [ { "name": ..., "score": ... } ] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    #[serde(default)]
    scores: Vec<Score>,
}

impl ScoreBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a board from `path`. A missing file is an empty board.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] of kind `Io` if the file exists but cannot be
    /// read, or of kind `Parse` if its content is malformed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No score file yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(StoreError::io(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let board: Self = serde_json::from_str(&content)?;
        debug!(players = board.scores.len(), "Scores loaded");
        Ok(board)
    }

    /// Reads a board, falling back to an empty one on any failure.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "Could not load scores, using an empty board");
            Self::new()
        })
    }

    /// Writes the board to `path` as indented JSON, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] of kind `Io` if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| {
            StoreError::io(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        info!(players = self.scores.len(), "Scores saved");
        Ok(())
    }

    /// Returns the player's score, or 0 if they have none.
    pub fn get(&self, name: &str) -> u32 {
        self.scores
            .iter()
            .find(|s| s.name == name)
            .map_or(0, |s| s.score)
    }

    /// Sets the player's score, appending a record for new players.
    #[instrument(skip(self))]
    pub fn set(&mut self, name: &str, score: u32) {
        match self.scores.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.score = score,
            None => self.scores.push(Score::new(name.to_string(), score)),
        }
    }

    /// Returns true if the player has a record, even a zero one.
    pub fn contains(&self, name: &str) -> bool {
        self.scores.iter().any(|s| s.name == name)
    }

    /// Records in insertion order.
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Records sorted by descending score, ties by name.
    pub fn ranked(&self) -> Vec<&Score> {
        let mut ranked: Vec<_> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        ranked
    }
}
