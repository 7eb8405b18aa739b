//! Handlers for a user's links: allocate, list, change expiry, delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, CreateLinkResponse, LinkItem, UpdateExpiryRequest, UpdateExpiryResponse,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::expiry::parse_expiry;

/// Allocates a short code for a URL.
///
/// # Endpoint
///
/// `POST /api/users/{telegram_id}/links`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is rejected.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(telegram_id, &payload.url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse::new(link, &state.base_url)),
    ))
}

/// Lists the user's links, newest first, with click counts.
///
/// # Endpoint
///
/// `GET /api/users/{telegram_id}/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<Vec<LinkItem>>, AppError> {
    let now = Utc::now();
    let items = state
        .link_service
        .list_links(telegram_id)
        .await?
        .into_iter()
        .map(|item| LinkItem::new(item, &state.base_url, now))
        .collect();

    Ok(Json(items))
}

/// Changes the expiry of one of the user's links.
///
/// # Endpoint
///
/// `PATCH /api/users/{telegram_id}/links/{code}`
///
/// # Errors
///
/// - 400 if the date is malformed, not in the future or too far out
/// - 404 if the link is missing or belongs to someone else
pub async fn update_expiry_handler(
    State(state): State<AppState>,
    Path((telegram_id, code)): Path<(i64, String)>,
    Json(payload): Json<UpdateExpiryRequest>,
) -> Result<Json<UpdateExpiryResponse>, AppError> {
    let expires_at = parse_expiry(&payload.expires_at)?;

    state
        .link_service
        .update_expiry(telegram_id, &code, expires_at)
        .await?;

    Ok(Json(UpdateExpiryResponse { code, expires_at }))
}

/// Deletes a link with its clicks and any suspect flag.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response
///
/// - `204 No Content` on success
/// - `404 Not Found` if the link does not exist
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
