//! Core domain types for hangman.

use derive_getters::Getters;
use std::collections::BTreeSet;

/// Character shown in the mask for a letter that has not been revealed.
pub const PLACEHOLDER: char = '_';

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// Every letter was found, or the whole word was guessed.
    Won,
    /// The player ran out of attempts.
    Lost,
}

/// Current status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Guesses are accepted.
    InProgress,
    /// Terminal: no further guesses are accepted.
    Ended(Outcome),
}

impl GameStatus {
    /// Returns the outcome if the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Ended(outcome) => Some(*outcome),
        }
    }

    /// Returns true once the game can no longer change.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Ended(_))
    }

    /// Short machine-readable label (`in_progress`, `won`, `lost`).
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Ended(Outcome::Won) => "won",
            GameStatus::Ended(Outcome::Lost) => "lost",
        }
    }
}

/// One player's game: the secret word, what has been revealed, and the
/// history of everything proposed so far.
///
/// Fields are only mutated through [`crate::apply`], which keeps the mask
/// monotonic and the proposal history free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Name the score is recorded under.
    player_name: String,
    /// Secret word, lowercase.
    word: String,
    /// Revealed letters or [`PLACEHOLDER`], one per character of `word`.
    mask: Vec<char>,
    /// Single letters proposed so far, right or wrong.
    guessed: BTreeSet<char>,
    /// Every distinct normalized proposal in submission order.
    proposals: Vec<String>,
    /// Errors accumulated (a wrong word costs two).
    errors: usize,
    /// Errors allowed before the game is lost.
    max_errors: usize,
    /// Current status.
    status: GameStatus,
}

impl Session {
    /// Assembles a session from its parts.
    ///
    /// Used by the rules when starting a game and by snapshot restore; callers
    /// are responsible for the mask matching the word.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        player_name: String,
        word: String,
        mask: Vec<char>,
        guessed: BTreeSet<char>,
        proposals: Vec<String>,
        errors: usize,
        max_errors: usize,
        status: GameStatus,
    ) -> Self {
        Self {
            player_name,
            word,
            mask,
            guessed,
            proposals,
            errors,
            max_errors,
            status,
        }
    }

    /// Returns the mask as a string, e.g. `c_t`.
    pub fn mask_string(&self) -> String {
        self.mask.iter().collect()
    }

    /// Returns the attempts left before the game is lost.
    pub fn attempts_remaining(&self) -> usize {
        self.max_errors.saturating_sub(self.errors)
    }

    /// Returns true when no placeholder remains in the mask.
    pub fn is_fully_revealed(&self) -> bool {
        !self.mask.contains(&PLACEHOLDER)
    }

    /// Returns true if the value was already proposed.
    pub fn has_proposed(&self, value: &str) -> bool {
        self.proposals.iter().any(|p| p == value)
    }

    pub(crate) fn record_proposal(&mut self, value: String) {
        self.proposals.push(value);
    }

    pub(crate) fn record_letter(&mut self, letter: char) -> bool {
        self.guessed.insert(letter)
    }

    /// Reveals every position holding `letter`; returns how many were revealed.
    pub(crate) fn reveal_letter(&mut self, letter: char) -> usize {
        let mut revealed = 0;
        for (slot, ch) in self.mask.iter_mut().zip(self.word.chars()) {
            if ch == letter && *slot == PLACEHOLDER {
                *slot = ch;
                revealed += 1;
            }
        }
        revealed
    }

    pub(crate) fn reveal_position(&mut self, index: usize) {
        if let (Some(slot), Some(ch)) = (self.mask.get_mut(index), self.word.chars().nth(index)) {
            *slot = ch;
        }
    }

    pub(crate) fn reveal_all(&mut self) {
        self.mask = self.word.chars().collect();
    }

    pub(crate) fn add_errors(&mut self, count: usize) {
        self.errors += count;
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }
}
