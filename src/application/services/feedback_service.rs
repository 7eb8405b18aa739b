//! Grades and reviews left by users.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Review;
use crate::domain::repositories::{FeedbackRepository, UserRepository};
use crate::error::AppError;

pub const MIN_GRADE: i16 = 1;
pub const MAX_GRADE: i16 = 5;
pub const MAX_REVIEW_CHARS: usize = 4000;
pub const DEFAULT_REVIEW_LIMIT: i64 = 5;
pub const MAX_REVIEW_LIMIT: i64 = 100;

pub struct FeedbackService<F: FeedbackRepository + ?Sized, U: UserRepository + ?Sized> {
    feedback_repository: Arc<F>,
    user_repository: Arc<U>,
}

impl<F: FeedbackRepository + ?Sized, U: UserRepository + ?Sized> FeedbackService<F, U> {
    pub fn new(feedback_repository: Arc<F>, user_repository: Arc<U>) -> Self {
        Self {
            feedback_repository,
            user_repository,
        }
    }

    /// Stores a 1..=5 grade.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the grade is out of range.
    pub async fn submit_grade(&self, telegram_id: i64, grade: i16) -> Result<(), AppError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(AppError::bad_request(
                "Grade must be between 1 and 5",
                json!({ "grade": grade }),
            ));
        }

        self.user_repository.ensure(telegram_id).await?;
        self.feedback_repository.save_grade(telegram_id, grade).await
    }

    /// Stores a review after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the text is blank or too long.
    pub async fn submit_review(&self, telegram_id: i64, review: &str) -> Result<(), AppError> {
        let review = review.trim();
        let chars = review.chars().count();

        if chars == 0 || chars > MAX_REVIEW_CHARS {
            return Err(AppError::bad_request(
                "Review must be between 1 and 4000 characters",
                json!({ "length": chars }),
            ));
        }

        self.user_repository.ensure(telegram_id).await?;
        self.feedback_repository.save_review(telegram_id, review).await
    }

    /// Newest reviews first. `limit` defaults to 5 and is capped at 100.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn latest_reviews(&self, limit: Option<i64>) -> Result<Vec<Review>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_REVIEW_LIMIT)
            .clamp(1, MAX_REVIEW_LIMIT);

        self.feedback_repository.latest_reviews(limit).await
    }

    pub async fn average_grade(&self) -> Result<Option<f64>, AppError> {
        self.feedback_repository.average_grade().await
    }
}
