//! Tests for session creation and guess evaluation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use strictly_hangman::{
    Feedback, GameStatus, GuessError, Outcome, PLACEHOLDER, Session, SessionSnapshot, StateTag,
    apply, new_session_with_rng, reveal_count,
};

/// Builds an in-progress session with nothing revealed.
fn blank(word: &str, max_errors: usize) -> Session {
    SessionSnapshot {
        player_name: "tester".to_string(),
        word: word.to_string(),
        mask: vec![PLACEHOLDER; word.chars().count()],
        guessed: BTreeMap::new(),
        errors: 0,
        state: StateTag::Playing,
        won: false,
        proposals: Vec::new(),
    }
    .restore(max_errors)
    .expect("valid snapshot")
}

fn revealed_positions(session: &Session) -> Vec<usize> {
    session
        .mask()
        .iter()
        .enumerate()
        .filter(|(_, c)| **c != PLACEHOLDER)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_new_session_reveals_expected_count() {
    let words = ["a", "ox", "cat", "dogs", "horse", "banana", "kangaroo", "abracadabra"];
    for (seed, word) in words.iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let session = new_session_with_rng(&mut rng, "ana", word, 6);

        assert_eq!(session.mask().len(), word.len());
        assert_eq!(revealed_positions(&session).len(), reveal_count(word.len()));
        for (m, w) in session.mask().iter().zip(word.chars()) {
            assert!(*m == PLACEHOLDER || *m == w);
        }
        assert_eq!(*session.status(), GameStatus::InProgress);
        assert_eq!(*session.errors(), 0);
        assert_eq!(*session.max_errors(), 6);
    }
}

#[test]
fn test_cat_scenario() {
    let mut session = blank("cat", 6);

    apply(&mut session, "c").expect("hit");
    assert_eq!(session.mask_string(), "c__");
    assert_eq!(*session.errors(), 0);

    apply(&mut session, "z").expect("miss");
    assert_eq!(*session.errors(), 1);

    let feedback = apply(&mut session, "cat").expect("word");
    assert_eq!(feedback, Feedback::Finished(Outcome::Won));
    assert_eq!(session.mask_string(), "cat");
}

#[test]
fn test_dog_scenario_loses_on_first_miss() {
    let mut session = blank("dog", 1);
    let feedback = apply(&mut session, "q").expect("miss");
    assert_eq!(feedback, Feedback::Finished(Outcome::Lost));
    assert_eq!(*session.status(), GameStatus::Ended(Outcome::Lost));
}

#[test]
fn test_duplicate_letter_is_idempotent() {
    let mut session = blank("dog", 6);
    apply(&mut session, "a").expect("miss");
    assert_eq!(*session.errors(), 1);

    let before = session.clone();
    let result = apply(&mut session, "A");
    assert_eq!(result, Err(GuessError::DuplicateProposal("a".to_string())));
    assert_eq!(session, before);
}

#[test]
fn test_duplicate_word_is_idempotent() {
    let mut session = blank("dog", 6);
    apply(&mut session, "cat").expect("wrong word");
    let before = session.clone();

    assert_eq!(
        apply(&mut session, " CAT "),
        Err(GuessError::DuplicateProposal("cat".to_string()))
    );
    assert_eq!(*session.errors(), *before.errors());
    assert_eq!(session.mask(), before.mask());
}

#[test]
fn test_mask_never_regresses() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = new_session_with_rng(&mut rng, "ana", "kaleidoscope", 30);
    let mut previous = revealed_positions(&session);

    for guess in ["z", "e", "kale", "o", "q", "x", "s", "c", "l", "i", "d", "p", "a", "k"] {
        let _ = apply(&mut session, guess);
        let now = revealed_positions(&session);
        assert!(previous.iter().all(|p| now.contains(p)), "position hidden again after {guess}");
        previous = now;
    }
    assert_eq!(*session.status(), GameStatus::Ended(Outcome::Won));
}

#[test]
fn test_win_takes_precedence_over_loss() {
    // Budget already spent and mask complete: the game counts as won.
    let session = SessionSnapshot {
        player_name: "tester".to_string(),
        word: "dog".to_string(),
        mask: vec!['d', 'o', 'g'],
        guessed: BTreeMap::from([('d', true), ('o', true), ('g', true)]),
        errors: 2,
        state: StateTag::Playing,
        won: false,
        proposals: ["d", "o", "zz", "g"].map(String::from).to_vec(),
    }
    .restore(2)
    .expect("valid snapshot");

    assert_eq!(*session.status(), GameStatus::Ended(Outcome::Won));
}

#[test]
fn test_wrong_word_can_overshoot_budget() {
    let mut session = blank("dog", 3);
    apply(&mut session, "x").expect("miss");
    apply(&mut session, "y").expect("miss");
    let feedback = apply(&mut session, "cat").expect("wrong word");
    assert_eq!(feedback, Feedback::Finished(Outcome::Lost));
    assert_eq!(*session.errors(), 4);
    assert_eq!(session.attempts_remaining(), 0);
}

#[test]
fn test_finished_session_rejects_everything() {
    let mut session = blank("ox", 6);
    apply(&mut session, "ox").expect("win");
    let finished = session.clone();

    for guess in ["a", "ox", "", "zebra", "1"] {
        assert_eq!(apply(&mut session, guess), Err(GuessError::SessionOver));
        assert_eq!(session, finished);
    }
}

#[test]
fn test_rejections_do_not_cost_attempts() {
    let mut session = blank("dog", 6);
    assert_eq!(apply(&mut session, ""), Err(GuessError::EmptyInput));
    assert_eq!(apply(&mut session, "\t"), Err(GuessError::EmptyInput));
    assert_eq!(apply(&mut session, "?"), Err(GuessError::InvalidLetter('?')));
    assert_eq!(*session.errors(), 0);
    assert_eq!(session.mask_string(), "___");
}

#[test]
fn test_invalid_letter_stays_blocked() {
    let mut session = blank("dog", 6);
    assert_eq!(apply(&mut session, "3"), Err(GuessError::InvalidLetter('3')));
    assert_eq!(session.proposals(), &vec!["3".to_string()]);
    assert_eq!(
        apply(&mut session, "3"),
        Err(GuessError::DuplicateProposal("3".to_string()))
    );
}

#[test]
fn test_already_guessed_letter_from_restored_game() {
    // A restored game can carry a guessed letter whose proposal was not kept.
    let mut session = SessionSnapshot {
        player_name: "tester".to_string(),
        word: "dog".to_string(),
        mask: vec![PLACEHOLDER; 3],
        guessed: BTreeMap::from([('a', true)]),
        errors: 1,
        state: StateTag::Playing,
        won: false,
        proposals: Vec::new(),
    }
    .restore(6)
    .expect("valid snapshot");

    assert_eq!(apply(&mut session, "a"), Err(GuessError::AlreadyGuessed('a')));
    assert_eq!(*session.errors(), 1);
}

#[test]
fn test_non_ascii_letters_are_letters() {
    let mut session = blank("été", 6);
    assert_eq!(apply(&mut session, "É"), Ok(Feedback::Hit { revealed: 2 }));
    assert_eq!(session.mask_string(), "é_é");
}
