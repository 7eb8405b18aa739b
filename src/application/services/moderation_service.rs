//! Abuse reports, suspect review and system statistics.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{FlagOutcome, Summary, SuspectLink};
use crate::domain::repositories::{LinkRepository, StatsRepository, SuspectRepository};
use crate::error::AppError;
use crate::utils::short_url::extract_code;

/// Service behind the report flow and the administrator's moderation tools.
pub struct ModerationService<L, S, T>
where
    L: LinkRepository + ?Sized,
    S: SuspectRepository + ?Sized,
    T: StatsRepository + ?Sized,
{
    link_repository: Arc<L>,
    suspect_repository: Arc<S>,
    stats_repository: Arc<T>,
    base_url: String,
}

impl<L, S, T> ModerationService<L, S, T>
where
    L: LinkRepository + ?Sized,
    S: SuspectRepository + ?Sized,
    T: StatsRepository + ?Sized,
{
    /// Creates a new moderation service.
    ///
    /// `base_url` decides which hosts count as "this service" when a report
    /// names a full short URL.
    pub fn new(
        link_repository: Arc<L>,
        suspect_repository: Arc<S>,
        stats_repository: Arc<T>,
        base_url: String,
    ) -> Self {
        Self {
            link_repository,
            suspect_repository,
            stats_repository,
            base_url,
        }
    }

    /// Flags the link named by `input` for review.
    ///
    /// `input` may be a bare code or a short URL of this service. Reporting an
    /// already flagged link succeeds without creating a second flag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input points to another host.
    /// Returns [`AppError::NotFound`] if no link uses the code.
    pub async fn report(&self, input: &str) -> Result<FlagOutcome, AppError> {
        let code = extract_code(input, &self.base_url)?;

        let link = self
            .link_repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let outcome = self.suspect_repository.flag(link.id, &code).await?;

        match outcome {
            FlagOutcome::Flagged => tracing::info!(%code, "Link reported"),
            FlagOutcome::AlreadyFlagged => tracing::debug!(%code, "Link already reported"),
        }

        Ok(outcome)
    }

    /// Lists reported links, oldest report first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_suspects(&self) -> Result<Vec<SuspectLink>, AppError> {
        self.suspect_repository.list().await
    }

    /// Resolves a report by deleting the link; the flag goes with it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is already gone.
    pub async fn resolve_report(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete_by_code(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        tracing::info!(%code, "Reported link removed");
        Ok(())
    }

    /// System-wide counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<Summary, AppError> {
        self.stats_repository.summary(Utc::now()).await
    }
}
