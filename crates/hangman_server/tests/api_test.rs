//! Tests for the HTTP routes.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use hangman_server::{ChannelQueue, HangmanService, MemoryCache, MemoryStore, SqliteStore, router};
use tempfile::NamedTempFile;

fn app() -> Router {
    let (queue, _jobs) = ChannelQueue::channel();
    let service = HangmanService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryCache::new()),
        Arc::new(queue),
    );
    router(service)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_user(app: &Router, name: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/hangman/v1/user",
        Some(json!({ "user_name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn new_game(app: &Router, user: &str, target: &str, attempts: i32) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/hangman/v1/game",
        Some(json!({ "user_name": user, "target": target, "attempts": attempts })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["urlsafe_key"]
        .as_str()
        .expect("Missing key")
        .to_string()
}

#[tokio::test]
async fn test_create_user_then_conflict() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/hangman/v1/user",
        Some(json!({ "user_name": "alice", "email": "alice@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User alice created!");

    let (status, body) = send(
        &app,
        Method::POST,
        "/hangman/v1/user",
        Some(json!({ "user_name": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A User with that name already exists!");
}

#[tokio::test]
async fn test_new_game_unknown_user_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/hangman/v1/game",
        Some(json!({ "user_name": "ghost", "target": "cat", "attempts": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "A User with that name does not exist!");
}

#[tokio::test]
async fn test_play_a_game() {
    let app = app();
    create_user(&app, "alice").await;
    let key = new_game(&app, "alice", "cat", 5).await;
    let uri = format!("/hangman/v1/game/{}", key);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revealed_word"], "___");
    assert_eq!(body["user_name"], "alice");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "guess": "a" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revealed_word"], "_a_");
    assert_eq!(body["attempts_remaining"], 3);
    assert_eq!(body["message"], "Miss!");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "guess": "cat" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game_over"], true);
    assert_eq!(body["won"], true);

    let history_uri = format!("/hangman/v1/game/history/{}", key);
    let (status, body) = send(&app, Method::GET, &history_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["moves"],
        json!(["Guess: 'a', Result: '_a_'", "You got the whole word! You win!"])
    );

    let (status, body) = send(&app, Method::GET, "/hangman/v1/scores/user/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["guesses"], 2);
    assert_eq!(body["items"][0]["won"], true);
}

#[tokio::test]
async fn test_invalid_guess_is_400() {
    let app = app();
    create_user(&app, "alice").await;
    let key = new_game(&app, "alice", "cat", 5).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/hangman/v1/game/{}", key),
        Some(json!({ "guess": "ab" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Guess one letter or the whole word each round!");
}

#[tokio::test]
async fn test_malformed_game_key_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/hangman/v1/game/not-a-key", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Game not found!");
}

#[tokio::test]
async fn test_cancel_game() {
    let app = app();
    create_user(&app, "alice").await;
    let key = new_game(&app, "alice", "cat", 5).await;
    let uri = format!("/hangman/v1/game/{}", key);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Game {} cancelled!", key));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_games_lists_active() {
    let app = app();
    create_user(&app, "alice").await;
    new_game(&app, "alice", "cat", 5).await;
    new_game(&app, "alice", "dog", 5).await;

    let (status, body) = send(&app, Method::GET, "/hangman/v1/games/user/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_high_scores_limit_and_ranking() {
    let app = app();
    create_user(&app, "alice").await;
    create_user(&app, "bob").await;
    for (user, guess) in [("alice", "cat"), ("bob", "cat"), ("bob", "z")] {
        let key = new_game(&app, user, "cat", 1).await;
        send(
            &app,
            Method::PUT,
            &format!("/hangman/v1/game/{}", key),
            Some(json!({ "guess": guess })),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/hangman/v1/scores/high", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));

    let (status, body) = send(
        &app,
        Method::GET,
        "/hangman/v1/scores/high?number_of_results=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, Method::GET, "/hangman/v1/scores", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(3));

    let (status, body) = send(&app, Method::GET, "/hangman/v1/ranking", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["name"], "alice");
    assert_eq!(body["items"][1]["name"], "bob");
    assert_eq!(body["items"][1]["performance"], 0.5);
}

#[tokio::test]
async fn test_average_attempts_starts_empty() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/hangman/v1/games/average_attempts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_against_sqlite() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::new(db_path).expect("Failed to create store");
    store.run_migrations().expect("Migrations failed");

    let (queue, _jobs) = ChannelQueue::channel();
    let app = router(HangmanService::new(
        Arc::new(store),
        Arc::new(MemoryCache::new()),
        Arc::new(queue),
    ));

    let requests: Vec<_> = (0..32)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let name = format!("player{}", i);
                create_user(&app, &name).await;
                let key = new_game(&app, &name, "hangman", 6).await;
                let (status, _) = send(
                    &app,
                    Method::PUT,
                    &format!("/hangman/v1/game/{}", key),
                    Some(json!({ "guess": "hangman" })),
                )
                .await;
                status
            })
        })
        .collect();

    for request in requests {
        let status = request.await.expect("Request task panicked");
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/hangman/v1/scores", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(32));
}
