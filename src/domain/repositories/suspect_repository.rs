//! Repository trait for moderation flags.

use crate::domain::entities::{FlagOutcome, SuspectLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reported links.
///
/// A link carries at most one flag. Flags disappear with their link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSuspectRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuspectRepository: Send + Sync {
    /// Flags a link. A second report of the same link changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the link no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn flag(&self, link_id: i64, short_code: &str) -> Result<FlagOutcome, AppError>;

    /// Lists flagged links, oldest report first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<SuspectLink>, AppError>;
}
