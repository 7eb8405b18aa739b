//! Moderation flag raised against a reported link.

use chrono::{DateTime, Utc};

/// A reported link awaiting administrator review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspectLink {
    pub link_id: i64,
    pub short_code: String,
    pub original_url: String,
    pub reported_at: DateTime<Utc>,
}

/// Outcome of flagging a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    /// A new flag was stored.
    Flagged,
    /// The link was already flagged; nothing changed.
    AlreadyFlagged,
}
