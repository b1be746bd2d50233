//! Opening a game: building the mask and giving the player a head start.

use crate::types::{GameStatus, PLACEHOLDER, Session};
use rand::Rng;
use rand::seq::index;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Number of letters revealed when a game opens.
///
/// Always leaves at least half the word hidden; words of three letters or
/// fewer start fully masked.
#[instrument]
pub fn reveal_count(word_len: usize) -> usize {
    (word_len / 2).saturating_sub(1)
}

/// Starts a session on `word`, revealing [`reveal_count`] distinct random
/// positions.
#[instrument(skip(word), fields(word_len = word.chars().count()))]
pub fn new_session(player_name: &str, word: &str, max_errors: usize) -> Session {
    new_session_with_rng(&mut rand::rng(), player_name, word, max_errors)
}

/// Same as [`new_session`] with a caller-supplied random source.
#[instrument(skip(rng, word), fields(word_len = word.chars().count()))]
pub fn new_session_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    player_name: &str,
    word: &str,
    max_errors: usize,
) -> Session {
    let word = word.trim().to_lowercase();
    let len = word.chars().count();

    let mut session = Session::from_parts(
        player_name.to_string(),
        word,
        vec![PLACEHOLDER; len],
        BTreeSet::new(),
        Vec::new(),
        0,
        max_errors,
        GameStatus::InProgress,
    );

    let count = reveal_count(len);
    for position in index::sample(rng, len, count).into_iter() {
        session.reveal_position(position);
    }

    debug!(revealed = count, max_errors, "Session opened");
    session
}
