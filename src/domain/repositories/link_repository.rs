//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkWithClicks, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Unique constraint guarding `links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Checks whether any link currently uses `code`, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with constraint [`SHORT_CODE_CONSTRAINT`]
    /// if another link took the code since it was checked.
    ///
    /// Returns [`AppError::Validation`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, regardless of expiry.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link owned by the user, newest first, with click counts.
    ///
    /// Links without clicks are included with a count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, telegram_id: i64) -> Result<Vec<LinkWithClicks>, AppError>;

    /// Sets a new expiry on a link, but only if `telegram_id` owns it.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a row was updated
    /// - `Ok(false)` if the link is missing or owned by someone else
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_expiry(
        &self,
        telegram_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Deletes a link together with its clicks and suspect flag.
    ///
    /// Returns `Ok(false)` if no link uses `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;
}
