//! Handler for abuse reports.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::reports::{ReportRequest, ReportResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Flags a link for moderation.
///
/// # Endpoint
///
/// `POST /api/reports`
///
/// # Request Body
///
/// ```json
/// { "link": "2lnx.ru/aB3x" }
/// ```
///
/// A bare code is accepted too. Reporting the same link twice is harmless.
///
/// # Response
///
/// - `202 Accepted` once the link is flagged
/// - `400 Bad Request` if the link belongs to another host
/// - `404 Not Found` if no link uses the code
pub async fn report_handler(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    payload.validate()?;

    let outcome = state.moderation_service.report(&payload.link).await?;

    Ok((StatusCode::ACCEPTED, Json(outcome.into())))
}
