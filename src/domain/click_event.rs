//! Click event model for asynchronous click tracking.

use crate::domain::entities::NewClick;

/// A click captured on the redirect path, waiting to be persisted.
///
/// Handlers send these through a bounded channel and respond immediately;
/// [`crate::domain::click_worker::run_click_worker`] writes them later.
/// The link id is resolved before sending, so the worker never looks the code up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    pub fn new(link_id: i64, ip: Option<String>, user_agent: Option<&str>) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            link_id: event.link_id,
            ip_address: event.ip,
            user_agent: event.user_agent,
        }
    }
}
