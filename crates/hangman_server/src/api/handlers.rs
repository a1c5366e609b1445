//! Axum handlers, one per service operation.
//!
//! Service calls reach the datastore synchronously, so each one runs on the
//! blocking pool rather than on a runtime worker.

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::{instrument, warn};

use crate::api::ApiError;
use crate::error::ServiceError;
use crate::forms::{
    GameForm, GameForms, HighScoreQuery, MakeMoveForm, MoveHistoryForm, NewGameForm, ScoreForms,
    StringMessage, UserForms, UserRequest,
};
use crate::service::HangmanService;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Runs a service call on the blocking pool and wraps its result.
async fn blocking<T, F>(call: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => Ok(Json(result?)),
        Err(e) => {
            warn!(error = %e, "Blocking service call did not complete");
            Err(ServiceError::internal(format!("Request aborted: {}", e)).into())
        }
    }
}

#[instrument(skip(service, req), fields(user_name = %req.user_name))]
pub(crate) async fn create_user(
    State(service): State<HangmanService>,
    Json(req): Json<UserRequest>,
) -> ApiResult<StringMessage> {
    blocking(move || service.create_user(&req.user_name, req.email)).await
}

#[instrument(skip(service, req), fields(user_name = %req.user_name))]
pub(crate) async fn new_game(
    State(service): State<HangmanService>,
    Json(req): Json<NewGameForm>,
) -> ApiResult<GameForm> {
    blocking(move || service.new_game(&req.user_name, &req.target, req.attempts)).await
}

#[instrument(skip(service))]
pub(crate) async fn cancel_game(
    State(service): State<HangmanService>,
    Path(urlsafe_game_key): Path<String>,
) -> ApiResult<StringMessage> {
    blocking(move || service.cancel_game(&urlsafe_game_key)).await
}

#[instrument(skip(service))]
pub(crate) async fn get_game(
    State(service): State<HangmanService>,
    Path(urlsafe_game_key): Path<String>,
) -> ApiResult<GameForm> {
    blocking(move || service.get_game(&urlsafe_game_key)).await
}

#[instrument(skip(service))]
pub(crate) async fn get_user_games(
    State(service): State<HangmanService>,
    Path(user_name): Path<String>,
) -> ApiResult<GameForms> {
    blocking(move || service.get_user_games(&user_name)).await
}

#[instrument(skip(service, req))]
pub(crate) async fn make_move(
    State(service): State<HangmanService>,
    Path(urlsafe_game_key): Path<String>,
    Json(req): Json<MakeMoveForm>,
) -> ApiResult<GameForm> {
    blocking(move || service.make_move(&urlsafe_game_key, &req.guess)).await
}

#[instrument(skip(service))]
pub(crate) async fn get_scores(State(service): State<HangmanService>) -> ApiResult<ScoreForms> {
    blocking(move || service.get_scores()).await
}

#[instrument(skip(service))]
pub(crate) async fn get_user_scores(
    State(service): State<HangmanService>,
    Path(user_name): Path<String>,
) -> ApiResult<ScoreForms> {
    blocking(move || service.get_user_scores(&user_name)).await
}

#[instrument(skip(service))]
pub(crate) async fn get_high_scores(
    State(service): State<HangmanService>,
    Query(query): Query<HighScoreQuery>,
) -> ApiResult<ScoreForms> {
    blocking(move || service.get_high_scores(query.number_of_results)).await
}

#[instrument(skip(service))]
pub(crate) async fn get_user_rankings(
    State(service): State<HangmanService>,
) -> ApiResult<UserForms> {
    blocking(move || service.get_user_rankings()).await
}

#[instrument(skip(service))]
pub(crate) async fn get_game_history(
    State(service): State<HangmanService>,
    Path(urlsafe_game_key): Path<String>,
) -> ApiResult<MoveHistoryForm> {
    blocking(move || service.get_game_history(&urlsafe_game_key)).await
}

// Reads only the in-process cache.
#[instrument(skip(service))]
pub(crate) async fn get_average_attempts(
    State(service): State<HangmanService>,
) -> Json<StringMessage> {
    Json(service.get_average_attempts_remaining())
}
