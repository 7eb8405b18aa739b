//! User entity keyed by an external messenger identity.

use chrono::{DateTime, Utc};

/// A registered user of the conversational front-end.
///
/// `telegram_id` is the identity the front-end knows the user by; `id` is the
/// internal key that links reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, telegram_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            telegram_id,
            created_at,
        }
    }
}
