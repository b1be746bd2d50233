//! Game rules for hangman.
//!
//! Pure functions over [`Session`](crate::Session): opening a game with a
//! partial reveal, and evaluating one proposal at a time. Front ends never
//! touch session fields directly.

pub mod guess;
pub mod reveal;

pub use guess::{Feedback, GuessError, WRONG_LETTER_PENALTY, WRONG_WORD_PENALTY, apply};
pub use reveal::{new_session, new_session_with_rng, reveal_count};
