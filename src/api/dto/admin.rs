//! DTOs for moderation endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::SuspectLink;

#[derive(Debug, Serialize)]
pub struct SuspectItem {
    pub short_code: String,
    pub original_url: String,
    pub reported_at: DateTime<Utc>,
}

impl From<SuspectLink> for SuspectItem {
    fn from(s: SuspectLink) -> Self {
        Self {
            short_code: s.short_code,
            original_url: s.original_url,
            reported_at: s.reported_at,
        }
    }
}
