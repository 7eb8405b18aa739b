//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::services::link_service::link_not_found;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;
use crate::utils::destination::with_scheme;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code to a live link (fresh database read)
/// 2. Offer a click event to the background worker without waiting
/// 3. Return `302 Found` with the destination in `Location`
///
/// # Click Tracking
///
/// Click events go to a bounded channel. If the queue is full or closed the
/// click is dropped and counted; the redirect still succeeds.
///
/// # Errors
///
/// Returns 404 Not Found for unknown and expired codes alike.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let link = match state.link_service.resolve(&code).await {
        Ok(link) => link,
        Err(e) => {
            let outcome = match e {
                AppError::NotFound { .. } => "not_found",
                _ => "error",
            };
            metrics::counter!("shortlinks_redirects_total", "outcome" => outcome).increment(1);
            return Err(e);
        }
    };

    let location = with_scheme(&link.original_url);
    let location = HeaderValue::from_str(&location).map_err(|_| {
        tracing::error!(%code, "Stored destination is not a valid Location header");
        AppError::internal(
            "Service temporarily unavailable, try again later",
            json!({}),
        )
    })?;

    let event = ClickEvent::new(
        link.id,
        client_ip(&headers, Some(addr), state.behind_proxy),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    if let Err(e) = state.click_sender.try_send(event) {
        metrics::counter!("shortlinks_clicks_dropped_total").increment(1);
        match e {
            TrySendError::Full(_) => tracing::warn!(%code, "Click queue full, dropping click"),
            TrySendError::Closed(_) => tracing::warn!(%code, "Click queue closed, dropping click"),
        }
    }

    metrics::counter!("shortlinks_redirects_total", "outcome" => "redirected").increment(1);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Answers every unmatched path with the same 404 a missing code gets.
pub async fn not_found_handler(uri: Uri) -> AppError {
    link_not_found(uri.path().trim_start_matches('/'))
}
