//! Saving a game in progress and resuming it later.

use crate::rules::guess::settle;
use crate::scores::{StoreError, StoreErrorKind};
use crate::types::{GameStatus, Outcome, PLACEHOLDER, Session};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Lifecycle tag as written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StateTag {
    /// No game running.
    Waiting,
    /// Game in progress.
    Playing,
    /// Game finished; see [`SessionSnapshot::won`].
    Ended,
}

impl From<StateTag> for u8 {
    fn from(tag: StateTag) -> Self {
        match tag {
            StateTag::Waiting => 0,
            StateTag::Playing => 1,
            StateTag::Ended => 2,
        }
    }
}

impl TryFrom<u8> for StateTag {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StateTag::Waiting),
            1 => Ok(StateTag::Playing),
            2 => Ok(StateTag::Ended),
            other => Err(format!("unknown game state {}", other)),
        }
    }
}

/// On-disk form of a [`Session`].
///
/// The error budget is not stored: it comes from the stage drawings in use
/// when the game is resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Player the game belongs to.
    pub player_name: String,
    /// Secret word.
    pub word: String,
    /// Mask, one character per letter of the word.
    pub mask: Vec<char>,
    /// Guessed letters, each mapped to `true`.
    pub guessed: BTreeMap<char, bool>,
    /// Errors so far.
    pub errors: usize,
    /// Lifecycle tag.
    pub state: StateTag,
    /// Whether a finished game was won.
    pub won: bool,
    /// Proposal history.
    pub proposals: Vec<String>,
}

impl SessionSnapshot {
    /// Captures the session's current state.
    #[instrument(skip(session), fields(player = %session.player_name()))]
    pub fn capture(session: &Session) -> Self {
        let (state, won) = match session.status() {
            GameStatus::InProgress => (StateTag::Playing, false),
            GameStatus::Ended(outcome) => (StateTag::Ended, *outcome == Outcome::Won),
        };
        Self {
            player_name: session.player_name().clone(),
            word: session.word().clone(),
            mask: session.mask().clone(),
            guessed: session.guessed().iter().map(|c| (*c, true)).collect(),
            errors: *session.errors(),
            state,
            won,
            proposals: session.proposals().clone(),
        }
    }

    /// Rebuilds a session with the given error budget.
    ///
    /// The word, mask, letters and proposals are lowercased the way
    /// [`crate::new_session`] and [`crate::apply`] would have stored them.
    /// Waiting and playing snapshots resume as in progress unless the mask is
    /// already complete (won) or the budget is spent (lost).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] of kind `Invalid` if the mask does not fit
    /// the word, a proposal appears twice, or an ended snapshot disagrees
    /// with its mask.
    #[instrument(skip(self), fields(player = %self.player_name))]
    pub fn restore(self, max_errors: usize) -> Result<Session, StoreError> {
        let word_text = self.word.trim().to_lowercase();
        let word: Vec<char> = word_text.chars().collect();
        let mask: Vec<char> = self.mask.iter().map(|c| lowercase(*c)).collect();

        if mask.len() != word.len() {
            return Err(StoreError::new(
                StoreErrorKind::Invalid,
                format!(
                    "mask has {} positions but the word has {}",
                    mask.len(),
                    word.len()
                ),
            ));
        }
        if let Some(index) = mask
            .iter()
            .zip(&word)
            .position(|(m, w)| *m != PLACEHOLDER && m != w)
        {
            return Err(StoreError::new(
                StoreErrorKind::Invalid,
                format!("mask position {} does not match the word", index),
            ));
        }

        let mut proposals: Vec<String> = Vec::with_capacity(self.proposals.len());
        for proposal in self.proposals {
            let proposal = proposal.trim().to_lowercase();
            if proposals.contains(&proposal) {
                return Err(StoreError::new(
                    StoreErrorKind::Invalid,
                    format!("proposal '{}' appears twice", proposal),
                ));
            }
            proposals.push(proposal);
        }

        let complete = !mask.contains(&PLACEHOLDER);
        let status = match (self.state, self.won) {
            (StateTag::Ended, won) if won != complete => {
                return Err(StoreError::new(
                    StoreErrorKind::Invalid,
                    "ended game does not agree with its mask",
                ));
            }
            (StateTag::Ended, true) => GameStatus::Ended(Outcome::Won),
            (StateTag::Ended, false) => GameStatus::Ended(Outcome::Lost),
            (StateTag::Waiting | StateTag::Playing, _) => GameStatus::InProgress,
        };

        let guessed = self
            .guessed
            .into_iter()
            .filter_map(|(letter, seen)| seen.then(|| lowercase(letter)))
            .collect();

        let mut session = Session::from_parts(
            self.player_name,
            word_text,
            mask,
            guessed,
            proposals,
            self.errors,
            max_errors,
            status,
        );
        if !status.is_over() {
            settle(&mut session);
        }

        debug!(status = ?session.status(), errors = *session.errors(), "Session restored");
        Ok(session)
    }

    /// Writes the snapshot as indented JSON.
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
        info!(player = %self.player_name, "Game saved");
        Ok(())
    }

    /// Reads a snapshot written by [`SessionSnapshot::save`].
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] of kind `Io` if the file cannot be read, or
    /// `Parse` if it is not a snapshot.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::io(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let snapshot: Self = serde_json::from_str(&content)?;
        debug!(player = %snapshot.player_name, "Snapshot loaded");
        Ok(snapshot)
    }
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
