//! PostgreSQL implementation of suspect repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{FlagOutcome, SuspectLink};
use crate::domain::repositories::SuspectRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SuspectRow {
    link_id: i64,
    short_code: String,
    original_url: String,
    reported_at: DateTime<Utc>,
}

pub struct PgSuspectRepository {
    pool: Arc<PgPool>,
}

impl PgSuspectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuspectRepository for PgSuspectRepository {
    async fn flag(&self, link_id: i64, short_code: &str) -> Result<FlagOutcome, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO suspect_links (link_id, short_code)
            VALUES ($1, $2)
            ON CONFLICT (link_id) DO NOTHING
            "#,
        )
        .bind(link_id)
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(if result.rows_affected() > 0 {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::AlreadyFlagged
        })
    }

    async fn list(&self) -> Result<Vec<SuspectLink>, AppError> {
        let rows = sqlx::query_as::<_, SuspectRow>(
            r#"
            SELECT s.link_id, s.short_code, l.original_url, s.reported_at
            FROM suspect_links s
            JOIN links l ON l.id = s.link_id
            ORDER BY s.reported_at ASC, s.id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SuspectLink {
                link_id: r.link_id,
                short_code: r.short_code,
                original_url: r.original_url,
                reported_at: r.reported_at,
            })
            .collect())
    }
}
