//! Handlers for grades and reviews.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::feedback::{GradeRequest, ReviewRequest};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/users/{telegram_id}/feedback`
pub async fn submit_grade_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
    Json(payload): Json<GradeRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .feedback_service
        .submit_grade(telegram_id, payload.grade)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/users/{telegram_id}/reviews`
pub async fn submit_review_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
    Json(payload): Json<ReviewRequest>,
) -> Result<StatusCode, AppError> {
    state
        .feedback_service
        .submit_review(telegram_id, &payload.review)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
