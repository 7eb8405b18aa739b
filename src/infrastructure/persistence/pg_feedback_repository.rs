//! PostgreSQL implementation of feedback repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Review;
use crate::domain::repositories::FeedbackRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    telegram_id: i64,
    review: String,
    created_at: DateTime<Utc>,
}

pub struct PgFeedbackRepository {
    pool: Arc<PgPool>,
}

impl PgFeedbackRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn unknown_user(telegram_id: i64) -> AppError {
    AppError::bad_request(
        "Referenced record does not exist",
        json!({ "telegram_id": telegram_id }),
    )
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn save_grade(&self, telegram_id: i64, grade: i16) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO feedback (user_id, grade)
            SELECT id, $2 FROM users WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .bind(grade)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(unknown_user(telegram_id));
        }

        Ok(())
    }

    async fn save_review(&self, telegram_id: i64, review: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (user_id, review)
            SELECT id, $2 FROM users WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .bind(review)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(unknown_user(telegram_id));
        }

        Ok(())
    }

    async fn latest_reviews(&self, limit: i64) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, u.telegram_id, r.review, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Review {
                id: r.id,
                telegram_id: r.telegram_id,
                review: r.review,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn average_grade(&self) -> Result<Option<f64>, AppError> {
        let avg = sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(grade)::FLOAT8 FROM feedback")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(avg)
    }
}
