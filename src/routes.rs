//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect (public)
//! - `GET  /health`      - Health check: database, click queue (public)
//! - `/api/*`            - JSON API (Bearer token required)
//! - anything else       - The same 404 an unknown code gets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token with client/admin roles
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds every route with authentication, rate limiting and tracing.
///
/// Handlers read the peer address through `ConnectInfo`, so the router must
/// be served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn router(state: AppState, behind_proxy: bool) -> Router {
    let api_router = rate_limit::apply(
        api::routes::protected_routes(state.clone()),
        rate_limit::API,
        behind_proxy,
    );

    let public_router = rate_limit::apply(
        Router::new()
            .route("/{code}", get(redirect_handler))
            .route("/health", get(health_handler)),
        rate_limit::PUBLIC,
        behind_proxy,
    );

    Router::new()
        .merge(public_router)
        .nest("/api", api_router)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// [`router`] with trailing slashes trimmed before routing.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, behind_proxy))
}
