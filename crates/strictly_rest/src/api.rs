//! REST routes over the game registry.

use crate::registry::{Registry, RegistryError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_tictactoe::GameRecord;
use tower::ServiceBuilder;
use tracing::{info, instrument, warn};

/// Path under which the game collection is mounted.
pub const GAMES_PATH: &str = "/api/v1/games";

/// Shared state handed to every handler.
#[derive(Debug, Clone, Getters, new)]
pub struct AppState {
    /// Game store.
    registry: Registry,
    /// Public base URL, without trailing slash.
    base_url: String,
}

impl AppState {
    fn location(&self, record: &GameRecord) -> String {
        format!("{}{}/{}", self.base_url, GAMES_PATH, record.id())
    }
}

/// Body of `POST` and `PUT` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRequest {
    /// Nine character board, case-insensitive.
    pub board: String,
}

/// Body of error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable reason.
    pub reason: String,
}

/// Error returned by handlers.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// Registry rejected the request.
    #[display("{}", _0)]
    Registry(RegistryError),

    /// Body could not be read.
    #[display("Invalid request body: {}", _0)]
    #[from(ignore)]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::InvalidInput(_))
            | ApiError::Registry(RegistryError::InvalidMove(_))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        warn!(%status, error = %self, "Request failed");
        let body = ErrorBody {
            reason: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GAMES_PATH, get(list_games).post(create_game))
        .route(
            &format!("{}/{{id}}", GAMES_PATH),
            get(get_game).put(make_move).delete(delete_game),
        )
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(state)
}

fn log_request(req: Request) -> Request {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

#[instrument(skip(state))]
async fn list_games(State(state): State<AppState>) -> Json<Vec<GameRecord>> {
    Json(state.registry.list())
}

#[instrument(skip(state, body))]
async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let record = state.registry.create(&req.board)?;
    let location = state.location(&record);
    info!(game_id = %record.id(), %location, "Game created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameRecord>, ApiError> {
    Ok(Json(state.registry.get(&id)?))
}

#[instrument(skip(state, body))]
async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<Json<GameRecord>, ApiError> {
    // Unknown ids take precedence over malformed bodies.
    state.registry.get(&id)?;
    let Json(req) = body?;
    Ok(Json(state.registry.apply_move(&id, &req.board)?))
}

/// Confirmation body for deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted {
    /// Confirmation message.
    pub description: String,
}

#[instrument(skip(state))]
async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    state.registry.delete(&id)?;
    Ok(Json(Deleted {
        description: "Game successfully deleted".to_string(),
    }))
}

/// Liveness report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Always `ok` while the server answers.
    pub status: String,
    /// Number of stored games.
    pub games: usize,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        games: state.registry.len(),
    })
}
