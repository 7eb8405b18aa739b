//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click recorded when a live short link is resolved.
///
/// Clicks are immutable; they disappear only when their link is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl Click {
    pub fn new(
        id: i64,
        link_id: i64,
        clicked_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            clicked_at,
            ip_address,
            user_agent,
        }
    }
}

/// Input data for recording a new click.
///
/// The `link_id` must reference an existing link; the timestamp is set by the
/// database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
