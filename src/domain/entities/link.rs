//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to its destination, owned by a user.
///
/// Every link carries an expiry; there are no permanent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub owner_id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        owner_id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            original_url,
            short_code,
            created_at,
            updated_at,
            expires_at,
        }
    }

    /// Returns true while `now` is strictly before the expiry.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Returns true once `now` has reached the expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_live_at(now)
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub owner_id: i64,
    pub original_url: String,
    pub short_code: String,
    pub expires_at: DateTime<Utc>,
}

/// A link together with its aggregate click count, as listed for its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkWithClicks {
    pub link: Link,
    pub click_count: i64,
}
