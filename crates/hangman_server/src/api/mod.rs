//! HTTP surface of the hangman service.
//!
//! Routes mirror the service operations one-to-one under [`API_PREFIX`].
//! Bodies are JSON; errors come back as `{"error": "..."}` with a status
//! matching the error kind.

mod error;
mod handlers;

pub use error::{ApiError, ErrorResponse};

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tracing::info;

use crate::service::HangmanService;

/// Path prefix of every route.
pub const API_PREFIX: &str = "/hangman/v1";

/// Builds the application router with request logging.
pub fn router(service: HangmanService) -> Router {
    let routes = Router::new()
        .route("/user", post(handlers::create_user))
        .route("/game", post(handlers::new_game))
        .route(
            "/game/{urlsafe_game_key}",
            get(handlers::get_game)
                .put(handlers::make_move)
                .delete(handlers::cancel_game),
        )
        .route(
            "/game/history/{urlsafe_game_key}",
            get(handlers::get_game_history),
        )
        .route("/games/user/{user_name}", get(handlers::get_user_games))
        .route(
            "/games/average_attempts",
            get(handlers::get_average_attempts),
        )
        .route("/scores", get(handlers::get_scores))
        .route("/scores/user/{user_name}", get(handlers::get_user_scores))
        .route("/scores/high", get(handlers::get_high_scores))
        .route("/ranking", get(handlers::get_user_rankings))
        .with_state(service);

    Router::new().nest(API_PREFIX, routes).layer(
        ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }),
    )
}
