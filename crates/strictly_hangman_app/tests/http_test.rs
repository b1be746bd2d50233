//! Tests for the JSON game server.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use strictly_hangman::{ScoreBoard, ScoreStore, WordBank};
use strictly_hangman_app::{AppState, CreatedGame, GameView, router};
use tempfile::TempDir;
use tower::ServiceExt;

/// Stage file with `max_errors + 1` drawings.
fn stages(max_errors: usize) -> String {
    let mut text = String::from("empty gallows\n");
    for stage in 1..=max_errors {
        text.push('\n');
        for line in 0..7 {
            text.push_str(&format!("stage {} line {}\n", stage, line));
        }
    }
    text
}

/// Router over a one-word bank; the temp dir holds the score file.
fn setup(word: &str, max_errors: usize) -> (TempDir, Router, AppState) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let bank = WordBank::from_readers(word.as_bytes(), stages(max_errors).as_bytes())
        .expect("Failed to build bank");
    let scores = ScoreStore::new(dir.path().join("scores.json"));
    let state = AppState::new(bank, scores);
    (dir, router(state.clone()), state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, value)
}

async fn create(app: &Router, player: &str) -> CreatedGame {
    let (status, body) = send(
        app,
        "POST",
        "/games",
        Some(serde_json::json!({ "player_name": player })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).expect("Unexpected create response")
}

async fn guess(app: &Router, id: &str, guess: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        "POST",
        &format!("/games/{}/guesses", id),
        Some(serde_json::json!({ "guess": guess })),
    )
    .await
}

#[tokio::test]
async fn test_create_game() {
    let (_dir, app, state) = setup("cat", 6);
    let created = create(&app, "alice").await;

    assert_eq!(created.game.player_name, "alice");
    assert_eq!(created.game.mask, "___");
    assert_eq!(created.game.attempts_remaining, 6);
    assert_eq!(created.game.status, "in_progress");
    assert_eq!(created.game.stage, "empty gallows");
    assert!(created.game.word.is_none());
    assert_eq!(state.sessions().len(), 1);
}

#[tokio::test]
async fn test_get_game() {
    let (_dir, app, _state) = setup("cat", 6);
    let created = create(&app, "alice").await;

    let (status, body) = send(&app, "GET", &format!("/games/{}", created.session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_value(body).expect("Unexpected view");
    assert_eq!(view.mask, "___");
    assert_eq!(view.player_name, "alice");
}

#[tokio::test]
async fn test_unknown_game_is_not_found() {
    let (_dir, app, _state) = setup("cat", 6);
    let (status, body) = send(&app, "GET", "/games/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());

    let (status, _) = guess(&app, "nope", "a").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_winning_game_is_scored_and_removed() {
    let (dir, app, state) = setup("cat", 6);
    let created = create(&app, "alice").await;
    let id = created.session_id;

    let (status, body) = guess(&app, &id, "c").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mask"], "c__");
    assert_eq!(body["attempts_remaining"], 6);

    let (_, body) = guess(&app, &id, "z").await;
    assert_eq!(body["attempts_remaining"], 5);
    assert_eq!(body["message"], "Wrong guess.");
    assert!(body["stage"].as_str().expect("stage").contains("stage 1"));

    let (status, body) = guess(&app, &id, "CAT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "won");
    assert_eq!(body["mask"], "cat");
    assert_eq!(body["word"], "cat");
    assert!(body["message"].as_str().expect("message").contains("cat"));

    assert!(state.sessions().is_empty());
    let (status, _) = send(&app, "GET", &format!("/games/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let board = ScoreBoard::load(dir.path().join("scores.json")).expect("Load failed");
    assert_eq!(board.get("alice"), 1);
}

#[tokio::test]
async fn test_losing_game_reveals_word_without_scoring() {
    let (dir, app, state) = setup("dog", 1);
    let created = create(&app, "bob").await;

    let (status, body) = guess(&app, &created.session_id, "q").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "lost");
    assert_eq!(body["word"], "dog");
    assert_eq!(body["attempts_remaining"], 0);
    assert!(state.sessions().is_empty());

    let board = ScoreBoard::load(dir.path().join("scores.json")).expect("Load failed");
    assert!(board.contains("bob"));
    assert_eq!(board.get("bob"), 0);
}

#[tokio::test]
async fn test_rejected_guess_keeps_state() {
    let (_dir, app, _state) = setup("dog", 6);
    let created = create(&app, "alice").await;
    let id = created.session_id;

    let (status, _) = guess(&app, &id, "x").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = guess(&app, &id, "x").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().expect("error").contains("already"));

    let (status, _) = guess(&app, &id, "   ").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = guess(&app, &id, "#").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, "GET", &format!("/games/{}", id), None).await;
    assert_eq!(body["attempts_remaining"], 5);
    assert_eq!(body["guessed"], "x");
}

#[tokio::test]
async fn test_empty_player_name_rejected() {
    let (_dir, app, state) = setup("cat", 6);
    let (status, _) = send(
        &app,
        "POST",
        "/games",
        Some(serde_json::json!({ "player_name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(state.sessions().is_empty());
}

#[tokio::test]
async fn test_list_scores() {
    let (_dir, app, _state) = setup("ox", 6);
    for player in ["alice", "alice", "bob"] {
        let created = create(&app, player).await;
        let (_, body) = guess(&app, &created.session_id, "ox").await;
        assert_eq!(body["status"], "won");
    }

    let (status, body) = send(&app, "GET", "/scores", None).await;
    assert_eq!(status, StatusCode::OK);
    let board: ScoreBoard = serde_json::from_value(body).expect("Unexpected scores");
    assert_eq!(board.get("alice"), 2);
    assert_eq!(board.get("bob"), 1);
}

#[tokio::test]
async fn test_games_are_independent() {
    let (_dir, app, state) = setup("dog", 6);
    let first = create(&app, "alice").await;
    let second = create(&app, "bob").await;
    assert_ne!(first.session_id, second.session_id);

    guess(&app, &first.session_id, "d").await;
    let (_, body) = send(&app, "GET", &format!("/games/{}", second.session_id), None).await;
    assert_eq!(body["mask"], "___");
    assert_eq!(state.sessions().len(), 2);
}
