//! Per-user conversational state for the chat front-end.
//!
//! The front-end asks the user for a link, a report target, an expiry date or a
//! review, and needs to remember what it asked across messages. Entries live in
//! memory only and expire after a fixed idle period.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// What the front-end is waiting for from a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingLink,
    AwaitingBadLink,
    AwaitingExpiry { code: String },
    AwaitingFeedback,
}

#[derive(Debug, Clone)]
struct Entry {
    state: SessionState,
    updated_at: DateTime<Utc>,
}

/// Concurrent in-memory session map keyed by telegram id.
///
/// A missing entry and an entry older than the TTL both read as
/// [`SessionState::Idle`]. Writes always replace the previous state.
#[derive(Debug)]
pub struct SessionStore {
    entries: DashMap<i64, Entry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    pub fn get(&self, telegram_id: i64) -> SessionState {
        self.get_at(telegram_id, Utc::now())
    }

    pub fn get_at(&self, telegram_id: i64, now: DateTime<Utc>) -> SessionState {
        match self.entries.get(&telegram_id) {
            Some(entry) if !self.is_stale(&entry, now) => entry.state.clone(),
            _ => SessionState::Idle,
        }
    }

    /// Stores `state` for the user. Setting [`SessionState::Idle`] removes the entry.
    pub fn set(&self, telegram_id: i64, state: SessionState) {
        self.set_at(telegram_id, state, Utc::now());
    }

    pub fn set_at(&self, telegram_id: i64, state: SessionState, now: DateTime<Utc>) {
        if state == SessionState::Idle {
            self.entries.remove(&telegram_id);
            return;
        }

        self.entries.insert(
            telegram_id,
            Entry {
                state,
                updated_at: now,
            },
        );
    }

    /// Reads the current state and resets the user to idle.
    pub fn take(&self, telegram_id: i64) -> SessionState {
        self.take_at(telegram_id, Utc::now())
    }

    pub fn take_at(&self, telegram_id: i64, now: DateTime<Utc>) -> SessionState {
        match self.entries.remove(&telegram_id) {
            Some((_, entry)) if !self.is_stale(&entry, now) => entry.state,
            _ => SessionState::Idle,
        }
    }

    pub fn clear(&self, telegram_id: i64) {
        self.entries.remove(&telegram_id);
    }

    /// Drops every stale entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_stale(entry, now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_stale(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.updated_at >= self.ttl
    }
}

/// Periodically purges stale sessions until the runtime shuts down.
pub async fn run_session_sweeper(store: std::sync::Arc<SessionStore>, every: std::time::Duration) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let purged = store.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, remaining = store.len(), "Purged expired sessions");
        }
    }
}
