//! DTOs for grades and reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::Review;

#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    #[validate(range(min = 1, max = 5, message = "Grade must be between 1 and 5"))]
    pub grade: i16,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub review: String,
}

/// Query parameters for the admin review read-back.
///
/// Uses `serde_with` to parse the limit from the query string.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReviewItem {
    pub telegram_id: i64,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewItem {
    fn from(r: Review) -> Self {
        Self {
            telegram_id: r.telegram_id,
            review: r.review,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    /// Mean grade, absent when nobody has graded yet.
    pub average: Option<f64>,
}
