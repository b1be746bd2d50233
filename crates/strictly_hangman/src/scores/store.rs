//! File-backed score store with serialized read-modify-write.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{info, instrument};

use crate::scores::{ScoreBoard, StoreError};

/// The score file plus the lock that serializes every update to it.
///
/// The lock is independent of any session lock, so players finishing at the
/// same moment contend only with each other.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ScoreStore {
    /// Creates a store backed by the file at `path`. Nothing is read yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating score store");
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Reads the current board.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn board(&self) -> Result<ScoreBoard, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        ScoreBoard::load(&self.path)
    }

    /// Adds one win to the player's score and returns the new total.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file cannot be read, parsed or written.
    /// Nothing is written when loading fails.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn record_win(&self, name: &str) -> Result<u32, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut board = ScoreBoard::load(&self.path)?;
        let total = board.get(name) + 1;
        board.set(name, total);
        board.save(&self.path)?;
        info!(player = name, total, "Win recorded");
        Ok(total)
    }

    /// Ensures the player has a record, creating a zero score if needed.
    ///
    /// Returns the player's current score.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file cannot be read, parsed or written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn register_player(&self, name: &str) -> Result<u32, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut board = ScoreBoard::load(&self.path)?;
        if board.contains(name) {
            return Ok(board.get(name));
        }
        board.set(name, 0);
        board.save(&self.path)?;
        info!(player = name, "Player registered");
        Ok(0)
    }
}
