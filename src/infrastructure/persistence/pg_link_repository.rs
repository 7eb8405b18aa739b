//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkWithClicks, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    owner_id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.owner_id,
            r.original_url,
            r.short_code,
            r.created_at,
            r.updated_at,
            r.expires_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct LinkWithClicksRow {
    #[sqlx(flatten)]
    link: LinkRow,
    click_count: i64,
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links_short_code_key` constraint is the final word on code
/// uniqueness; violations surface as [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM links WHERE short_code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (owner_id, original_url, short_code, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, original_url, short_code, created_at, updated_at, expires_at
            "#,
        )
        .bind(new_link.owner_id)
        .bind(new_link.original_url)
        .bind(new_link.short_code)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, owner_id, original_url, short_code, created_at, updated_at, expires_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, telegram_id: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        let rows = sqlx::query_as::<_, LinkWithClicksRow>(
            r#"
            SELECT
                l.id,
                l.owner_id,
                l.original_url,
                l.short_code,
                l.created_at,
                l.updated_at,
                l.expires_at,
                COUNT(c.id) AS click_count
            FROM links l
            JOIN users u ON u.id = l.owner_id
            LEFT JOIN clicks c ON c.link_id = l.id
            WHERE u.telegram_id = $1
            GROUP BY l.id
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .bind(telegram_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkWithClicks {
                link: r.link.into(),
                click_count: r.click_count,
            })
            .collect())
    }

    async fn update_expiry(
        &self,
        telegram_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links l
            SET expires_at = $3, updated_at = NOW()
            FROM users u
            WHERE u.id = l.owner_id
              AND u.telegram_id = $1
              AND l.short_code = $2
            "#,
        )
        .bind(telegram_id)
        .bind(code)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
