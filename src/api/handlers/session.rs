//! Handlers exposing the per-user chat session state.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::session::SessionState;
use crate::state::AppState;

/// `GET /api/users/{telegram_id}/session`
///
/// Missing and expired sessions both read as `idle`.
pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Json<SessionState> {
    Json(state.sessions.get(telegram_id))
}

/// `PUT /api/users/{telegram_id}/session`
///
/// Replaces whatever state the user was in.
pub async fn put_session_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
    Json(session): Json<SessionState>,
) -> Json<SessionState> {
    state.sessions.set(telegram_id, session.clone());
    Json(session)
}

/// `POST /api/users/{telegram_id}/session/take`
///
/// Returns the pending state and resets the user to idle in one step, so a
/// reply is consumed by exactly one handler on the front-end.
pub async fn take_session_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Json<SessionState> {
    Json(state.sessions.take(telegram_id))
}

/// `DELETE /api/users/{telegram_id}/session`
pub async fn delete_session_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> StatusCode {
    state.sessions.clear(telegram_id);
    StatusCode::NO_CONTENT
}
