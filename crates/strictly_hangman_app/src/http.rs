//! JSON game server.
//!
//! Sessions live in a [`SessionRegistry`]; a game is removed from it as soon
//! as it is won or lost, after the win (if any) has been recorded.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strictly_hangman::{
    Feedback, Outcome, ScoreBoard, ScoreStore, Session, SessionId, SessionRegistry, WordBank,
    apply, new_session, new_session_id,
};
use tracing::{debug, error, info, instrument, warn};

use crate::config::GameConfig;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    bank: Arc<WordBank>,
    sessions: SessionRegistry,
    scores: Arc<ScoreStore>,
}

impl AppState {
    /// Creates the server state.
    #[instrument(skip_all)]
    pub fn new(bank: WordBank, scores: ScoreStore) -> Self {
        info!(words = bank.words().len(), "Creating server state");
        Self {
            bank: Arc::new(bank),
            sessions: SessionRegistry::new(),
            scores: Arc::new(scores),
        }
    }

    /// Active sessions.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

/// Body of `POST /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Name the score is recorded under.
    pub player_name: String,
}

/// Body of `POST /games/{id}/guesses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// A letter or a whole word.
    pub guess: String,
}

/// Response of `POST /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedGame {
    /// Id to use in later requests.
    pub session_id: SessionId,
    /// Initial state.
    pub game: GameView,
}

/// What a client needs to draw a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Player name.
    pub player_name: String,
    /// Mask such as `c_t`.
    pub mask: String,
    /// Guessed letters, sorted.
    pub guessed: String,
    /// Attempts left.
    pub attempts_remaining: usize,
    /// Drawing for the current error count.
    pub stage: String,
    /// `in_progress`, `won` or `lost`.
    pub status: String,
    /// Message about the last turn.
    pub message: String,
    /// The secret word, once the game is over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

impl GameView {
    fn new(session: &Session, bank: &WordBank, message: String) -> Self {
        Self {
            player_name: session.player_name().clone(),
            mask: session.mask_string(),
            guessed: session.guessed().iter().collect(),
            attempts_remaining: session.attempts_remaining(),
            stage: bank.stage(*session.errors()).to_string(),
            status: session.status().label().to_string(),
            message,
            word: session.status().is_over().then(|| session.word().clone()),
        }
    }
}

fn feedback_message(session: &Session, feedback: Feedback) -> String {
    match feedback {
        Feedback::Hit { .. } => "Good guess!".to_string(),
        Feedback::Miss => "Wrong guess.".to_string(),
        Feedback::WrongWord => "That's not the word.".to_string(),
        Feedback::Finished(Outcome::Won) => format!(
            "Congratulations {}, you found the word! The word was: {}",
            session.player_name(),
            session.word()
        ),
        Feedback::Finished(Outcome::Lost) => {
            format!("You lost. The word was: {}", session.word())
        }
    }
}

/// Error response: a status code and a JSON `{ "error": ... }` body.
#[derive(Debug, Clone, derive_more::Display)]
#[display("{}: {}", status, message)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found(id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("No game with id {}", id))
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Runs a score file operation off the async runtime.
async fn with_scores<T: Send + 'static>(
    scores: &Arc<ScoreStore>,
    f: impl FnOnce(&ScoreStore) -> T + Send + 'static,
) -> Result<T, ApiError> {
    let scores = Arc::clone(scores);
    tokio::task::spawn_blocking(move || f(&scores))
        .await
        .map_err(|e| {
            error!(error = %e, "Score task failed");
            ApiError::internal("Score task failed")
        })
}

/// Builds the router with all game routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games", post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/guesses", post(submit_guess))
        .route("/scores", get(list_scores))
        .with_state(state)
}

/// Starts a game for a player.
#[instrument(skip(state, req), fields(player = %req.player_name))]
async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreatedGame>), ApiError> {
    let player = req.player_name.trim().to_string();
    if player.is_empty() {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Player name must not be empty",
        ));
    }

    let name = player.clone();
    if let Err(e) = with_scores(&state.scores, move |s| s.register_player(&name)).await? {
        warn!(error = %e, "Failed to register player");
    }

    let word = state.bank.pick_random_word().map_err(|e| {
        error!(error = %e, "Cannot start a game");
        ApiError::internal(e.to_string())
    })?;
    let session = new_session(&player, &word, state.bank.max_errors());
    let game = GameView::new(
        &session,
        &state.bank,
        "Guess a letter or the whole word.".to_string(),
    );

    let session_id = new_session_id();
    state
        .sessions
        .create(session_id.clone(), session)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(session_id = %session_id, "Game created");
    Ok((StatusCode::CREATED, Json(CreatedGame { session_id, game })))
}

/// Returns the current state of a game.
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| ApiError::not_found(&id))?;
    debug!(errors = *session.errors(), "Game fetched");
    Ok(Json(GameView::new(
        &session,
        &state.bank,
        "Guess a letter or the whole word.".to_string(),
    )))
}

/// Applies one guess. A finished game is removed and, if won, scored.
#[instrument(skip(state, req), fields(guess = %req.guess))]
async fn submit_guess(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<GameView>, ApiError> {
    let bank = Arc::clone(&state.bank);
    let turn = state
        .sessions
        .with_session(&id, |session| {
            apply(session, &req.guess).map(|feedback| {
                let message = feedback_message(session, feedback);
                (feedback, GameView::new(session, &bank, message))
            })
        })
        .ok_or_else(|| ApiError::not_found(&id))?;

    let (feedback, view) = turn.map_err(|e| {
        debug!(error = %e, "Guess rejected");
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    if let Feedback::Finished(outcome) = feedback {
        state.sessions.delete(&id);
        if outcome == Outcome::Won {
            let name = view.player_name.clone();
            if let Err(e) = with_scores(&state.scores, move |s| s.record_win(&name)).await? {
                warn!(error = %e, "Failed to record win");
            }
        }
        info!(%outcome, "Game finished");
    }

    Ok(Json(view))
}

/// Returns every player's score.
#[instrument(skip(state))]
async fn list_scores(State(state): State<AppState>) -> Result<Json<ScoreBoard>, ApiError> {
    let board = with_scores(&state.scores, |s| s.board()).await?.map_err(|e| {
        error!(error = %e, "Failed to read scores");
        ApiError::internal("Scores are unavailable")
    })?;
    Ok(Json(board))
}

/// Loads the word bank and serves games until the process is stopped.
#[instrument(skip(config), fields(host = %config.host(), port = *config.port()))]
pub async fn serve(config: GameConfig) -> Result<()> {
    let bank = WordBank::load(config.words_path(), config.stages_path())?;
    let scores = ScoreStore::new(config.scores_path());
    let app = router(AppState::new(bank, scores));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app).await?;
    Ok(())
}
