//! Handlers for moderation and statistics, admin tokens only.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::admin::SuspectItem;
use crate::api::dto::feedback::{GradeResponse, ReviewItem, ReviewsQuery};
use crate::domain::entities::Summary;
use crate::error::AppError;
use crate::state::AppState;

/// Lists reported links, oldest report first.
///
/// # Endpoint
///
/// `GET /api/admin/suspects`
pub async fn list_suspects_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SuspectItem>>, AppError> {
    let suspects = state
        .moderation_service
        .list_suspects()
        .await?
        .into_iter()
        .map(SuspectItem::from)
        .collect();

    Ok(Json(suspects))
}

/// Deletes a reported link; the flag is removed with it.
///
/// # Endpoint
///
/// `DELETE /api/admin/suspects/{code}`
pub async fn resolve_suspect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.moderation_service.resolve_report(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// System-wide counters.
///
/// # Endpoint
///
/// `GET /api/admin/stats`
///
/// # Response
///
/// ```json
/// { "users": 12, "links": 40, "clicks": 311, "expired_links": 3 }
/// ```
pub async fn summary_handler(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    Ok(Json(state.moderation_service.summary().await?))
}

/// `GET /api/admin/reviews?limit=N`
pub async fn reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<ReviewItem>>, AppError> {
    let reviews = state
        .feedback_service
        .latest_reviews(query.limit)
        .await?
        .into_iter()
        .map(ReviewItem::from)
        .collect();

    Ok(Json(reviews))
}

/// `GET /api/admin/grade`
pub async fn grade_handler(State(state): State<AppState>) -> Result<Json<GradeResponse>, AppError> {
    let average = state.feedback_service.average_grade().await?;
    Ok(Json(GradeResponse { average }))
}
