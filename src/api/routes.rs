//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the admin group additionally requires an
//! admin token.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, delete_session_handler, get_session_handler,
    grade_handler, list_links_handler, list_suspects_handler, put_session_handler,
    register_user_handler, report_handler, resolve_suspect_handler, reviews_handler,
    submit_grade_handler, submit_review_handler, summary_handler, take_session_handler,
    update_expiry_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

/// Routes available to any valid token.
///
/// # Endpoints
///
/// - `POST   /users`                          - Register a user (idempotent)
/// - `POST   /users/{telegram_id}/links`      - Allocate a short link
/// - `GET    /users/{telegram_id}/links`      - List the user's links
/// - `PATCH  /users/{telegram_id}/links/{code}` - Change a link's expiry
/// - `POST   /users/{telegram_id}/feedback`   - Submit a 1-5 grade
/// - `POST   /users/{telegram_id}/reviews`    - Submit a free-text review
/// - `GET|PUT|DELETE /users/{telegram_id}/session` - Conversation state
/// - `POST   /users/{telegram_id}/session/take` - Read and reset conversation state
/// - `DELETE /links/{code}`                   - Delete a link
/// - `POST   /reports`                        - Report a link for moderation
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user_handler))
        .route(
            "/users/{telegram_id}/links",
            post(create_link_handler).get(list_links_handler),
        )
        .route(
            "/users/{telegram_id}/links/{code}",
            patch(update_expiry_handler),
        )
        .route("/users/{telegram_id}/feedback", post(submit_grade_handler))
        .route("/users/{telegram_id}/reviews", post(submit_review_handler))
        .route(
            "/users/{telegram_id}/session",
            get(get_session_handler)
                .put(put_session_handler)
                .delete(delete_session_handler),
        )
        .route(
            "/users/{telegram_id}/session/take",
            post(take_session_handler),
        )
        .route("/links/{code}", delete(delete_link_handler))
        .route("/reports", post(report_handler))
}

/// Moderation and statistics, admin tokens only.
///
/// # Endpoints
///
/// - `GET    /suspects`        - Reported links
/// - `DELETE /suspects/{code}` - Delete a reported link
/// - `GET    /stats`           - System-wide counters
/// - `GET    /reviews?limit=N` - Latest reviews
/// - `GET    /grade`           - Average grade
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/suspects", get(list_suspects_handler))
        .route("/suspects/{code}", delete(resolve_suspect_handler))
        .route("/stats", get(summary_handler))
        .route("/reviews", get(reviews_handler))
        .route("/grade", get(grade_handler))
        .route_layer(middleware::from_fn(auth::require_admin))
}

/// The whole `/api` tree behind Bearer authentication.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    client_routes()
        .nest("/admin", admin_routes())
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
