//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick, Summary};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    users: i64,
    links: i64,
    clicks: i64,
    expired_links: i64,
}

/// PostgreSQL repository for click tracking and aggregate counters.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (link_id, ip_address, user_agent)
            VALUES ($1, $2, $3)
            RETURNING id, link_id, clicked_at, ip_address, user_agent
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.ip_address)
        .bind(new_click.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Click::new(
            row.id,
            row.link_id,
            row.clicked_at,
            row.ip_address,
            row.user_agent,
        ))
    }

    async fn summary(&self, now: DateTime<Utc>) -> Result<Summary, AppError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM links) AS links,
                (SELECT COUNT(*) FROM clicks) AS clicks,
                (SELECT COUNT(*) FROM links WHERE expires_at <= $1) AS expired_links
            "#,
        )
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Summary {
            users: row.users,
            links: row.links,
            clicks: row.clicks,
            expired_links: row.expired_links,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
