//! DTOs for user registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub telegram_id: i64,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub telegram_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            telegram_id: user.telegram_id,
            created_at: user.created_at,
        }
    }
}
