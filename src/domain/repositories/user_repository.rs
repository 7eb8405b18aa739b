//! Repository trait for link owners.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users identified by their telegram id.
///
/// Users are created on first interaction and never deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the user with the given telegram id, creating it if absent.
    ///
    /// Calling this repeatedly for the same id always yields the same user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn ensure(&self, telegram_id: i64) -> Result<User, AppError>;
}
