//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::application::services::{
    AuthService, FeedbackService, LinkPolicy, LinkService, ModerationService,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{
    FeedbackRepository, LinkRepository, StatsRepository, SuspectRepository, TokenRepository,
    UserRepository,
};
use crate::domain::session::SessionStore;
use crate::infrastructure::persistence::{
    PgFeedbackRepository, PgLinkRepository, PgStatsRepository, PgSuspectRepository,
    PgTokenRepository, PgUserRepository,
};

pub type AppLinkService = LinkService<dyn LinkRepository, dyn UserRepository>;
pub type AppModerationService =
    ModerationService<dyn LinkRepository, dyn SuspectRepository, dyn StatsRepository>;
pub type AppFeedbackService = FeedbackService<dyn FeedbackRepository, dyn UserRepository>;
pub type AppAuthService = AuthService<dyn TokenRepository>;

/// Every repository the services need, behind trait objects.
///
/// Production wires the PostgreSQL implementations; tests may substitute others.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub links: Arc<dyn LinkRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub suspects: Arc<dyn SuspectRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            stats: Arc::new(PgStatsRepository::new(pool.clone())),
            suspects: Arc::new(PgSuspectRepository::new(pool.clone())),
            feedback: Arc::new(PgFeedbackRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool)),
        }
    }
}

/// Settings the state needs beyond its repositories.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub base_url: String,
    pub behind_proxy: bool,
    pub token_signing_secret: String,
    pub link_policy: LinkPolicy,
    pub session_ttl: Duration,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub moderation_service: Arc<AppModerationService>,
    pub feedback_service: Arc<AppFeedbackService>,
    pub auth_service: Arc<AppAuthService>,
    /// Used directly by the health check.
    pub stats_repository: Arc<dyn StatsRepository>,
    pub sessions: Arc<SessionStore>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub base_url: String,
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: StateSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            repositories.links.clone(),
            repositories.users.clone(),
            settings.link_policy,
        ));

        let moderation_service = Arc::new(ModerationService::new(
            repositories.links.clone(),
            repositories.suspects.clone(),
            repositories.stats.clone(),
            settings.base_url.clone(),
        ));

        let feedback_service = Arc::new(FeedbackService::new(
            repositories.feedback.clone(),
            repositories.users.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            repositories.tokens.clone(),
            settings.token_signing_secret,
        ));

        Self {
            link_service,
            moderation_service,
            feedback_service,
            auth_service,
            stats_repository: repositories.stats,
            sessions: Arc::new(SessionStore::new(settings.session_ttl)),
            click_sender,
            base_url: settings.base_url,
            behind_proxy: settings.behind_proxy,
        }
    }
}
