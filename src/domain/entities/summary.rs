//! System-wide counters for the moderation dashboard.

use serde::Serialize;

/// Aggregate counts over the whole store.
///
/// Every field is a plain aggregate query; nothing here is cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub users: i64,
    pub links: i64,
    pub clicks: i64,
    pub expired_links: i64,
}
