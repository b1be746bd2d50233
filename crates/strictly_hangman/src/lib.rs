//! Strictly Hangman - game logic for a word-guessing game
//!
//! Everything here is independent of how the game is presented: the
//! terminal and HTTP front ends only call into these types.
//!
//! # Architecture
//!
//! - **WordBank**: candidate words and the hangman drawings
//! - **Session**: one player's game (word, mask, guesses, errors, status)
//! - **Rules**: [`new_session`] and [`apply`], the only way a session changes
//! - **Scores**: per-player win counts persisted as JSON
//! - **Registry**: concurrent table of active sessions for the server
//!
//! # Example
//!
//! ```
//! use strictly_hangman::{Feedback, GameStatus, Outcome, apply, new_session};
//!
//! let mut session = new_session("ana", "cat", 6);
//! assert_eq!(apply(&mut session, "c"), Ok(Feedback::Hit { revealed: 1 }));
//! assert_eq!(apply(&mut session, "cat"), Ok(Feedback::Finished(Outcome::Won)));
//! assert_eq!(*session.status(), GameStatus::Ended(Outcome::Won));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bank;
mod registry;
mod rules;
mod scores;
mod snapshot;
mod types;

// Crate-level exports - Word bank
pub use bank::{BankError, STAGE_HEIGHT, WordBank};

// Crate-level exports - Session types
pub use types::{GameStatus, Outcome, PLACEHOLDER, Session};

// Crate-level exports - Rules
pub use rules::{
    Feedback, GuessError, WRONG_LETTER_PENALTY, WRONG_WORD_PENALTY, apply, new_session,
    new_session_with_rng, reveal_count,
};

// Crate-level exports - Scores
pub use scores::{Score, ScoreBoard, ScoreStore, StoreError, StoreErrorKind};

// Crate-level exports - Session registry
pub use registry::{RegistryError, SessionId, SessionRegistry, new_session_id};

// Crate-level exports - Pause and resume
pub use snapshot::{SessionSnapshot, StateTag};
