//! Guess evaluation: the single entry point that advances a session.

use crate::types::{GameStatus, Outcome, PLACEHOLDER, Session};
use tracing::{debug, info, instrument, warn};

/// Errors incurred by a single wrong whole-word guess.
pub const WRONG_WORD_PENALTY: usize = 2;

/// Errors incurred by a single wrong letter.
pub const WRONG_LETTER_PENALTY: usize = 1;

/// A proposal the rules refused.
///
/// None of these consume a turn: `errors` and `mask` are untouched. An
/// [`GuessError::InvalidLetter`] is the one rejection that still lands in the
/// proposal history, so the same character is refused as a duplicate next time.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GuessError {
    /// The game has already been won or lost.
    #[display("The game is over")]
    SessionOver,

    /// Nothing but whitespace was submitted.
    #[display("Please enter a letter or a word")]
    EmptyInput,

    /// The exact proposal was made before.
    #[display("You already proposed '{}'", _0)]
    DuplicateProposal(String),

    /// A single character that is not a letter.
    #[display("'{}' is not a valid letter", _0)]
    InvalidLetter(char),

    /// The letter is already among the guessed letters.
    #[display("You already guessed the letter '{}'", _0)]
    AlreadyGuessed(char),
}

impl std::error::Error for GuessError {}

/// What a successful turn did, for the front end to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// The letter is in the word; `revealed` positions were uncovered.
    Hit {
        /// Positions uncovered by this letter.
        revealed: usize,
    },
    /// The letter is not in the word.
    Miss,
    /// A whole-word guess that did not match.
    WrongWord,
    /// This turn finished the game.
    Finished(Outcome),
}

/// Applies one raw proposal to the session.
///
/// The proposal is trimmed and lowercased. Anything longer than one
/// character is a whole-word guess. A win is evaluated before a loss, so a
/// turn that completes the mask always wins.
///
/// # Errors
///
/// Returns a [`GuessError`] when the proposal is refused; the session's
/// errors and mask are unchanged in that case.
#[instrument(skip(session), fields(player = %session.player_name(), errors = *session.errors()))]
pub fn apply(session: &mut Session, raw: &str) -> Result<Feedback, GuessError> {
    if session.status().is_over() {
        warn!("Proposal on a finished session");
        return Err(GuessError::SessionOver);
    }

    let proposal = raw.trim().to_lowercase();
    if proposal.is_empty() {
        return Err(GuessError::EmptyInput);
    }

    if session.has_proposed(&proposal) {
        debug!(%proposal, "Duplicate proposal");
        return Err(GuessError::DuplicateProposal(proposal));
    }
    session.record_proposal(proposal.clone());

    let mut chars = proposal.chars();
    let feedback = match (chars.next(), chars.next()) {
        (Some(letter), None) => guess_letter(session, letter)?,
        _ => guess_word(session, &proposal),
    };

    Ok(settle(session).map(Feedback::Finished).unwrap_or(feedback))
}

fn guess_word(session: &mut Session, proposal: &str) -> Feedback {
    if proposal == session.word() {
        let revealed = session.mask().iter().filter(|c| **c == PLACEHOLDER).count();
        info!(revealed, "Word guessed");
        session.reveal_all();
        Feedback::Hit { revealed }
    } else {
        session.add_errors(WRONG_WORD_PENALTY);
        debug!(errors = *session.errors(), "Wrong word");
        Feedback::WrongWord
    }
}

fn guess_letter(session: &mut Session, letter: char) -> Result<Feedback, GuessError> {
    if !letter.is_alphabetic() {
        warn!(%letter, "Rejected non-letter");
        return Err(GuessError::InvalidLetter(letter));
    }
    if !session.record_letter(letter) {
        return Err(GuessError::AlreadyGuessed(letter));
    }

    let revealed = session.reveal_letter(letter);
    if session.word().contains(letter) {
        debug!(%letter, revealed, "Letter hit");
        Ok(Feedback::Hit { revealed })
    } else {
        session.add_errors(WRONG_LETTER_PENALTY);
        debug!(%letter, errors = *session.errors(), "Letter miss");
        Ok(Feedback::Miss)
    }
}

/// Moves the session to a terminal status if it has ended, win first.
pub(crate) fn settle(session: &mut Session) -> Option<Outcome> {
    let outcome = if session.is_fully_revealed() {
        Outcome::Won
    } else if session.errors() >= session.max_errors() {
        Outcome::Lost
    } else {
        return None;
    };

    info!(%outcome, errors = *session.errors(), "Game over");
    session.set_status(GameStatus::Ended(outcome));
    Some(outcome)
}
