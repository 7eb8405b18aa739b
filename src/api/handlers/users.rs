//! Handler for user registration.

use axum::{Json, extract::State};

use crate::api::dto::users::{RegisterUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user; repeated calls return the same record.
///
/// # Endpoint
///
/// `POST /api/users`
pub async fn register_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .link_service
        .register_user(payload.telegram_id)
        .await?;

    Ok(Json(user.into()))
}
