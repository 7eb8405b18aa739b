//! Link allocation, resolution and lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{Link, LinkWithClicks, NewLink, User};
use crate::domain::repositories::{LinkRepository, SHORT_CODE_CONSTRAINT, UserRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;

/// Tunables for code allocation and link lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Initial code length.
    pub code_length: usize,
    /// Candidates tried per length before growing the code.
    pub max_attempts: usize,
    /// How many characters the code may grow by before allocation gives up.
    pub length_escalation: usize,
    /// Lifetime of a freshly created link.
    pub lifetime_days: i64,
    /// Upper bound, in days from now, for a user-chosen expiry.
    pub max_lifetime_days: i64,
}

impl LinkPolicy {
    /// Largest lifetime, in days, either setting may take.
    pub const LIFETIME_LIMIT_DAYS: i64 = 36_500;
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            code_length: 4,
            max_attempts: 10,
            length_escalation: 4,
            lifetime_days: 30,
            max_lifetime_days: 730,
        }
    }
}

/// Service for allocating, resolving and managing short links.
///
/// Allocation generates random codes and relies on the `short_code` unique
/// constraint as the final arbiter, so concurrent allocators never hand out
/// the same code.
pub struct LinkService<L: LinkRepository + ?Sized, U: UserRepository + ?Sized> {
    link_repository: Arc<L>,
    user_repository: Arc<U>,
    policy: LinkPolicy,
}

impl<L: LinkRepository + ?Sized, U: UserRepository + ?Sized> LinkService<L, U> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, user_repository: Arc<U>, policy: LinkPolicy) -> Self {
        Self {
            link_repository,
            user_repository,
            policy,
        }
    }

    /// Registers a user, returning the existing record if already known.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_user(&self, telegram_id: i64) -> Result<User, AppError> {
        self.user_repository.ensure(telegram_id).await
    }

    /// Allocates a fresh short code for `url` and stores the link.
    ///
    /// The owner is registered on the fly if needed. The link expires after
    /// the configured lifetime.
    ///
    /// # Code Generation
    ///
    /// - Up to `max_attempts` random candidates are tried per length
    /// - A candidate already in use, or lost to a concurrent insert, is a collision
    /// - After a full round of collisions the code grows by one character
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is rejected.
    /// Returns [`AppError::Internal`] if every length is exhausted or on database errors.
    pub async fn create_short_link(&self, telegram_id: i64, url: &str) -> Result<Link, AppError> {
        let original_url = validate_url(url)?;
        let expires_at = Duration::try_days(self.policy.lifetime_days)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                tracing::error!(
                    lifetime_days = self.policy.lifetime_days,
                    "Link lifetime is out of range"
                );
                AppError::internal(
                    "Service temporarily unavailable, try again later",
                    json!({}),
                )
            })?;
        let owner = self.user_repository.ensure(telegram_id).await?;

        let first = self.policy.code_length;
        let last = first + self.policy.length_escalation;

        for length in first..=last {
            for _ in 0..self.policy.max_attempts {
                let code = generate_code(length);

                if self.link_repository.exists_by_code(&code).await? {
                    metrics::counter!("shortlinks_code_collisions_total").increment(1);
                    continue;
                }

                let new_link = NewLink {
                    owner_id: owner.id,
                    original_url: original_url.clone(),
                    short_code: code,
                    expires_at,
                };

                match self.link_repository.create(new_link).await {
                    Ok(link) => {
                        metrics::counter!("shortlinks_links_created_total").increment(1);
                        tracing::info!(code = %link.short_code, owner = telegram_id, "Short link created");
                        return Ok(link);
                    }
                    Err(e) if e.is_conflict_on(SHORT_CODE_CONSTRAINT) => {
                        metrics::counter!("shortlinks_code_collisions_total").increment(1);
                    }
                    Err(e) => return Err(e),
                }
            }

            if length < last {
                metrics::counter!("shortlinks_code_length_escalations_total").increment(1);
                tracing::warn!(
                    from = length,
                    to = length + 1,
                    attempts = self.policy.max_attempts,
                    "Code space congested, growing code length"
                );
            }
        }

        tracing::error!(max_length = last, "Code allocation exhausted");
        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Lists the user's links, newest first, with click counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, telegram_id: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        self.link_repository.list_by_owner(telegram_id).await
    }

    /// Changes the expiry of a link owned by `telegram_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the expiry is not in the future or
    /// lies further out than the maximum lifetime.
    /// Returns [`AppError::NotFound`] if the link is missing or owned by someone else.
    pub async fn update_expiry(
        &self,
        telegram_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.update_expiry_at(telegram_id, code, expires_at, Utc::now())
            .await
    }

    pub async fn update_expiry_at(
        &self,
        telegram_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.check_expiry(expires_at, now)?;

        let updated = self
            .link_repository
            .update_expiry(telegram_id, code, expires_at)
            .await?;

        if !updated {
            return Err(AppError::not_found(
                "Link not found or not owned by user",
                json!({ "code": code }),
            ));
        }

        tracing::info!(%code, owner = telegram_id, %expires_at, "Link expiry updated");
        Ok(())
    }

    /// Deletes a link with its clicks and suspect flag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete_by_code(code).await? {
            return Err(link_not_found(code));
        }

        tracing::info!(%code, "Link deleted");
        Ok(())
    }

    /// Resolves a code to its live link.
    ///
    /// Empty, unknown and expired codes produce the same error so callers
    /// cannot probe which codes once existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] unless the link exists and is live.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.resolve_at(code, Utc::now()).await
    }

    pub async fn resolve_at(&self, code: &str, now: DateTime<Utc>) -> Result<Link, AppError> {
        if code.is_empty() {
            return Err(link_not_found(code));
        }

        match self.link_repository.find_by_code(code).await? {
            Some(link) if link.is_live_at(now) => Ok(link),
            _ => Err(link_not_found(code)),
        }
    }

    fn check_expiry(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AppError> {
        if expires_at <= now {
            return Err(AppError::bad_request(
                "Expiry must be in the future",
                json!({ "expires_at": expires_at }),
            ));
        }

        let too_far = Duration::try_days(self.policy.max_lifetime_days)
            .is_none_or(|max| expires_at - now > max);
        if too_far {
            return Err(AppError::bad_request(
                "Expiry is too far in the future",
                json!({
                    "expires_at": expires_at,
                    "max_lifetime_days": self.policy.max_lifetime_days,
                }),
            ));
        }

        Ok(())
    }
}

/// The single not-found error shared by every failed resolution.
pub fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
