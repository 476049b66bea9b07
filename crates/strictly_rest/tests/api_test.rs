//! Tests for the REST routes, driven through the router without a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use strictly_rest::{AppState, GAMES_PATH, Registry, router};
use strictly_tictactoe::{GameId, Player};
use tower::ServiceExt;

const BASE_URL: &str = "http://127.0.0.1:8080";

fn app() -> (Router, Registry) {
    let registry = Registry::with_seed(21);
    let app = router(AppState::new(registry.clone(), BASE_URL.to_string()));
    (app, registry)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|h| h.to_str().expect("Bad header").to_string());
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, location, json)
}

fn game_uri(id: &str) -> String {
    format!("{}/{}", GAMES_PATH, id)
}

fn seed_game(registry: &Registry, board: &str) -> String {
    registry
        .insert_position(board, Player::X)
        .expect("Invalid test board")
        .id()
        .to_string()
}

fn marks(board: &Value, symbol: char) -> usize {
    board
        .as_str()
        .expect("Board is not a string")
        .chars()
        .filter(|&c| c == symbol)
        .count()
}

#[tokio::test]
async fn test_create_returns_created_with_location() {
    let (app, _) = app();
    let (status, location, body) =
        send(&app, Method::POST, GAMES_PATH, Some(json!({"board": "---------"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("Missing id");
    assert_eq!(
        location.as_deref(),
        Some(format!("{}/api/v1/games/{}", BASE_URL, id).as_str())
    );
    assert_eq!(body["status"], "RUNNING");
    assert_eq!(marks(&body["board"], 'O'), 1);
    assert_eq!(marks(&body["board"], 'X'), 0);

    let (status, _, fetched) = send(&app, Method::GET, &game_uri(id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_create_response_hides_internal_fields() {
    let (app, _) = app();
    let (_, _, body) =
        send(&app, Method::POST, GAMES_PATH, Some(json!({"board": "---------"}))).await;
    let mut keys: Vec<_> = body.as_object().expect("Not an object").keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["board", "id", "status"]);
}

#[tokio::test]
async fn test_create_rejects_invalid_boards() {
    let (app, registry) = app();
    for board in ["----X--", "----XX---", "----a----"] {
        let (status, location, body) =
            send(&app, Method::POST, GAMES_PATH, Some(json!({ "board": board }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "board {board}");
        assert!(location.is_none());
        assert!(body["reason"].is_string());
    }
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_board_field() {
    let (app, registry) = app();
    let (status, _, body) =
        send(&app, Method::POST, GAMES_PATH, Some(json!({"cells": "---------"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["reason"].is_string());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_list_games() {
    let (app, _) = app();
    let (_, _, empty) = send(&app, Method::GET, GAMES_PATH, None).await;
    assert_eq!(empty, json!([]));

    send(&app, Method::POST, GAMES_PATH, Some(json!({"board": "---------"}))).await;
    send(&app, Method::POST, GAMES_PATH, Some(json!({"board": "---O-----"}))).await;

    let (status, _, games) = send(&app, Method::GET, GAMES_PATH, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games.as_array().expect("Not an array").len(), 2);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let (app, _) = app();
    let missing = game_uri(&GameId::generate().to_string());
    let malformed = game_uri("nonsense");

    for uri in [&missing, &malformed] {
        let (status, _, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["reason"].is_string());

        let (status, _, _) =
            send(&app, Method::PUT, uri, Some(json!({"board": "X--------"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_move_wins_game() {
    let (app, registry) = app();
    let id = seed_game(&registry, "OXXOXOXO-");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &game_uri(&id),
        Some(json!({"board": "oxxoxoxox"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "X_WON");
    assert_eq!(body["board"], "OXXOXOXOX");
}

#[tokio::test]
async fn test_move_draws_game() {
    let (app, registry) = app();
    let id = seed_game(&registry, "OXOXOXXO-");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &game_uri(&id),
        Some(json!({"board": "OXOXOXXOX"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DRAW");
}

#[tokio::test]
async fn test_running_move_gets_counter_move() {
    let (app, registry) = app();
    let id = seed_game(&registry, "O--------");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &game_uri(&id),
        Some(json!({"board": "O---X----"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "RUNNING");
    assert_eq!(marks(&body["board"], 'X'), 1);
    assert_eq!(marks(&body["board"], 'O'), 2);
}

#[tokio::test]
async fn test_two_square_change_is_rejected() {
    let (app, registry) = app();
    let id = seed_game(&registry, "O--------");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &game_uri(&id),
        Some(json!({"board": "O---XX---"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["reason"].is_string());

    let (_, _, stored) = send(&app, Method::GET, &game_uri(&id), None).await;
    assert_eq!(stored["board"], "O--------");
}

#[tokio::test]
async fn test_delete_game() {
    let (app, _) = app();
    let (_, _, body) =
        send(&app, Method::POST, GAMES_PATH, Some(json!({"board": "---------"}))).await;
    let uri = game_uri(body["id"].as_str().expect("Missing id"));

    let (status, _, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Game successfully deleted");

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_game_count() {
    let (app, _) = app();
    send(&app, Method::POST, GAMES_PATH, Some(json!({"board": "---------"}))).await;

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "games": 1}));
}
