//! Rate limiting middleware using token bucket algorithm.
//!
//! Limits are keyed per client IP. With `behind_proxy` the key comes from
//! `X-Forwarded-For` / `X-Real-IP` / `Forwarded`; otherwise from the socket
//! peer address.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::SmartIpKeyExtractor,
};

use crate::state::AppState;

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Milliseconds to replenish one token.
    pub replenish_ms: u64,
    pub burst_size: u32,
}

/// Public endpoints: redirects and health.
///
/// - **Rate**: 50 requests per second
/// - **Burst**: 200 requests
pub const PUBLIC: Limits = Limits {
    replenish_ms: 20,
    burst_size: 200,
};

/// Authenticated API endpoints.
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 50 requests
pub const API: Limits = Limits {
    replenish_ms: 500,
    burst_size: 50,
};

/// Wraps `router` in a governor keyed per client IP.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api_routes(), rate_limit::API, config.behind_proxy);
/// ```
pub fn apply(router: Router<AppState>, limits: Limits, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_millisecond(limits.replenish_ms)
                .burst_size(limits.burst_size)
                .finish()
                .expect("rate limit settings are non-zero"),
        );
        router.layer(GovernorLayer::new(governor_conf))
    } else {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_millisecond(limits.replenish_ms)
                .burst_size(limits.burst_size)
                .finish()
                .expect("rate limit settings are non-zero"),
        );
        router.layer(GovernorLayer::new(governor_conf))
    }
}
