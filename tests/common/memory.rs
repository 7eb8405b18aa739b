//! In-memory implementation of every repository trait.
//!
//! Mirrors the constraints the PostgreSQL schema enforces: unique short codes,
//! owner and link foreign keys, one flag per link, and cascading deletes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use shortlinks::domain::entities::{
    Click, FlagOutcome, Link, LinkWithClicks, NewClick, NewLink, Review, Summary, SuspectLink,
    User,
};
use shortlinks::domain::repositories::{
    ApiToken, FeedbackRepository, LinkRepository, SHORT_CODE_CONSTRAINT, StatsRepository,
    SuspectRepository, TokenRepository, TokenRole, UserRepository,
};
use shortlinks::error::AppError;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    links: Vec<Link>,
    clicks: Vec<Click>,
    suspects: Vec<SuspectLink>,
    grades: Vec<(i64, i16)>,
    reviews: Vec<Review>,
    tokens: Vec<ApiToken>,
}

impl Tables {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, telegram_id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.telegram_id == telegram_id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    database_down: AtomicBool,
}

fn foreign_key(constraint: &str) -> AppError {
    AppError::bad_request(
        "Referenced record does not exist",
        json!({ "constraint": constraint }),
    )
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `ping` fail, as an unreachable database would.
    pub fn set_database_down(&self, down: bool) {
        self.database_down.store(down, Ordering::SeqCst);
    }

    pub fn insert_token(&self, name: &str, token_hash: &str, role: TokenRole) {
        let mut t = self.tables.lock().unwrap();
        let id = t.id();
        t.tokens.push(ApiToken {
            id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            role,
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
    }

    /// Inserts a link directly, bypassing allocation.
    pub fn insert_link(&self, telegram_id: i64, code: &str, url: &str, expires_at: DateTime<Utc>) -> Link {
        let mut t = self.tables.lock().unwrap();
        let owner_id = match t.user(telegram_id) {
            Some(u) => u.id,
            None => {
                let id = t.id();
                t.users.push(User::new(id, telegram_id, Utc::now()));
                id
            }
        };
        let id = t.id();
        let now = Utc::now();
        let link = Link::new(
            id,
            owner_id,
            url.to_string(),
            code.to_string(),
            now,
            now,
            expires_at,
        );
        t.links.push(link.clone());
        link
    }

    pub fn link(&self, code: &str) -> Option<Link> {
        let t = self.tables.lock().unwrap();
        t.links.iter().find(|l| l.short_code == code).cloned()
    }

    /// Overwrites a link's expiry without any validation.
    pub fn force_expiry(&self, code: &str, expires_at: DateTime<Utc>) {
        let mut t = self.tables.lock().unwrap();
        if let Some(link) = t.links.iter_mut().find(|l| l.short_code == code) {
            link.expires_at = expires_at;
        }
    }

    pub fn clicks_for(&self, link_id: i64) -> usize {
        let t = self.tables.lock().unwrap();
        t.clicks.iter().filter(|c| c.link_id == link_id).count()
    }

    pub fn click_rows(&self) -> usize {
        self.tables.lock().unwrap().clicks.len()
    }

    pub fn suspect_rows(&self) -> usize {
        self.tables.lock().unwrap().suspects.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn ensure(&self, telegram_id: i64) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(user) = t.user(telegram_id) {
            return Ok(user.clone());
        }
        let id = t.id();
        let user = User::new(id, telegram_id, Utc::now());
        t.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.links.iter().any(|l| l.short_code == code))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": SHORT_CODE_CONSTRAINT }),
            ));
        }
        if !t.users.iter().any(|u| u.id == new_link.owner_id) {
            return Err(foreign_key("links_owner_id_fkey"));
        }
        let id = t.id();
        let now = Utc::now();
        let link = Link::new(
            id,
            new_link.owner_id,
            new_link.original_url,
            new_link.short_code,
            now,
            now,
            new_link.expires_at,
        );
        t.links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.link(code))
    }

    async fn list_by_owner(&self, telegram_id: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        let t = self.tables.lock().unwrap();
        let Some(owner) = t.user(telegram_id) else {
            return Ok(Vec::new());
        };
        let mut items: Vec<LinkWithClicks> = t
            .links
            .iter()
            .filter(|l| l.owner_id == owner.id)
            .map(|l| LinkWithClicks {
                link: l.clone(),
                click_count: t.clicks.iter().filter(|c| c.link_id == l.id).count() as i64,
            })
            .collect();
        items.sort_by(|a, b| {
            b.link
                .created_at
                .cmp(&a.link.created_at)
                .then(b.link.id.cmp(&a.link.id))
        });
        Ok(items)
    }

    async fn update_expiry(
        &self,
        telegram_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(owner_id) = t.user(telegram_id).map(|u| u.id) else {
            return Ok(false);
        };
        match t
            .links
            .iter_mut()
            .find(|l| l.short_code == code && l.owner_id == owner_id)
        {
            Some(link) => {
                link.expires_at = expires_at;
                link.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(pos) = t.links.iter().position(|l| l.short_code == code) else {
            return Ok(false);
        };
        let link = t.links.remove(pos);
        t.clicks.retain(|c| c.link_id != link.id);
        t.suspects.retain(|s| s.link_id != link.id);
        Ok(true)
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut t = self.tables.lock().unwrap();
        if !t.links.iter().any(|l| l.id == new_click.link_id) {
            return Err(foreign_key("clicks_link_id_fkey"));
        }
        let id = t.id();
        let click = Click::new(
            id,
            new_click.link_id,
            Utc::now(),
            new_click.ip_address,
            new_click.user_agent,
        );
        t.clicks.push(click.clone());
        Ok(click)
    }

    async fn summary(&self, now: DateTime<Utc>) -> Result<Summary, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(Summary {
            users: t.users.len() as i64,
            links: t.links.len() as i64,
            clicks: t.clicks.len() as i64,
            expired_links: t.links.iter().filter(|l| l.is_expired_at(now)).count() as i64,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.database_down.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "Service temporarily unavailable, try again later",
                json!({}),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SuspectRepository for MemoryStore {
    async fn flag(&self, link_id: i64, short_code: &str) -> Result<FlagOutcome, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.suspects.iter().any(|s| s.link_id == link_id) {
            return Ok(FlagOutcome::AlreadyFlagged);
        }
        let Some(link) = t.links.iter().find(|l| l.id == link_id).cloned() else {
            return Err(foreign_key("suspect_links_link_id_fkey"));
        };
        t.suspects.push(SuspectLink {
            link_id,
            short_code: short_code.to_string(),
            original_url: link.original_url,
            reported_at: Utc::now(),
        });
        Ok(FlagOutcome::Flagged)
    }

    async fn list(&self) -> Result<Vec<SuspectLink>, AppError> {
        let mut suspects = self.tables.lock().unwrap().suspects.clone();
        suspects.sort_by_key(|s| s.reported_at);
        Ok(suspects)
    }
}

#[async_trait]
impl FeedbackRepository for MemoryStore {
    async fn save_grade(&self, telegram_id: i64, grade: i16) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.user(telegram_id).is_none() {
            return Err(foreign_key("feedback_user_id_fkey"));
        }
        t.grades.push((telegram_id, grade));
        Ok(())
    }

    async fn save_review(&self, telegram_id: i64, review: &str) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.user(telegram_id).is_none() {
            return Err(foreign_key("reviews_user_id_fkey"));
        }
        let id = t.id();
        t.reviews.push(Review {
            id,
            telegram_id,
            review: review.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn latest_reviews(&self, limit: i64) -> Result<Vec<Review>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut reviews = t.reviews.clone();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        reviews.truncate(limit.max(0) as usize);
        Ok(reviews)
    }

    async fn average_grade(&self) -> Result<Option<f64>, AppError> {
        let t = self.tables.lock().unwrap();
        if t.grades.is_empty() {
            return Ok(None);
        }
        let total: f64 = t.grades.iter().map(|(_, g)| f64::from(*g)).sum();
        Ok(Some(total / t.grades.len() as f64))
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn validate_token(&self, token_hash: &str) -> Result<Option<TokenRole>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .tokens
            .iter()
            .find(|tok| tok.token_hash == token_hash && tok.revoked_at.is_none())
            .map(|tok| tok.role))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(tok) = t.tokens.iter_mut().find(|tok| tok.token_hash == token_hash) {
            tok.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        token_hash: &str,
        role: TokenRole,
    ) -> Result<ApiToken, AppError> {
        if self.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "api_tokens_name_key" }),
            ));
        }
        self.insert_token(name, token_hash, role);
        Ok(self.find_by_name(name).await?.expect("token just inserted"))
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tables.lock().unwrap().tokens.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.tokens.iter().find(|tok| tok.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.tokens.iter().find(|tok| tok.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        match t
            .tokens
            .iter_mut()
            .find(|tok| tok.id == id && tok.revoked_at.is_none())
        {
            Some(tok) => {
                tok.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
