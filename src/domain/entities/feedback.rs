//! Feedback written by users: service grades and free-text reviews.

use chrono::{DateTime, Utc};

/// A free-text review left by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub telegram_id: i64,
    pub review: String,
    pub created_at: DateTime<Utc>,
}
