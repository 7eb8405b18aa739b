//! Repository trait for grades and reviews.

use crate::domain::entities::Review;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user feedback.
///
/// Grades and reviews are stored opaquely; the only reads are the admin
/// read-backs below.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Stores a grade for the user. The grade range is enforced by callers and the schema.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_grade(&self, telegram_id: i64, grade: i16) -> Result<(), AppError>;

    /// Stores a free-text review for the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_review(&self, telegram_id: i64, review: &str) -> Result<(), AppError>;

    /// Returns up to `limit` reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn latest_reviews(&self, limit: i64) -> Result<Vec<Review>, AppError>;

    /// Mean of all grades, or `None` when nobody has graded yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn average_grade(&self) -> Result<Option<f64>, AppError>;
}
