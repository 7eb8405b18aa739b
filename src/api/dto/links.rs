//! DTOs for link allocation, listing and expiry updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkWithClicks};
use crate::utils::short_url::build_short_url;

/// Request to shorten a URL on behalf of a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination, with or without scheme.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// A freshly allocated short link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub expires_at: DateTime<Utc>,
}

impl CreateLinkResponse {
    pub fn new(link: Link, base_url: &str) -> Self {
        Self {
            short_url: build_short_url(base_url, &link.short_code),
            code: link.short_code,
            original_url: link.original_url,
            expires_at: link.expires_at,
        }
    }
}

/// One entry of a user's link list.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: i64,
    pub is_expired: bool,
}

impl LinkItem {
    pub fn new(item: LinkWithClicks, base_url: &str, now: DateTime<Utc>) -> Self {
        let LinkWithClicks { link, click_count } = item;

        Self {
            short_url: build_short_url(base_url, &link.short_code),
            is_expired: link.is_expired_at(now),
            code: link.short_code,
            original_url: link.original_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_count,
        }
    }
}

/// New expiry for a link, as `DD-MM-YYYY` or an RFC 3339 timestamp.
#[derive(Debug, Deserialize)]
pub struct UpdateExpiryRequest {
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateExpiryResponse {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}
