//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::repositories::TokenRole;
use crate::{error::AppError, state::AppState};

/// The authenticated caller, stored in request extensions by [`layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub role: TokenRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == TokenRole::Admin
    }
}

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Hash it and look up an active token with that hash
/// 3. Record the token's role as a [`Principal`] extension
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let role = st.auth_service.authenticate(&token).await?;
    parts.extensions.insert(Principal { role });

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Rejects callers whose token is not an admin token.
///
/// Must run after [`layer`]; a request without a [`Principal`] is treated as
/// unauthenticated.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    match req.extensions().get::<Principal>() {
        Some(principal) if principal.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(AppError::forbidden(
            "Admin token required",
            json!({"required_role": TokenRole::Admin.as_str()}),
        )),
        None => Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Authorization header is missing or invalid"}),
        )),
    }
}
