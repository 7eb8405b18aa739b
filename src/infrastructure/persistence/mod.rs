//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Link owners
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgStatsRepository`] - Click recording and summary counters
//! - [`PgSuspectRepository`] - Moderation flags
//! - [`PgFeedbackRepository`] - Grades and reviews
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_feedback_repository;
pub mod pg_link_repository;
pub mod pg_stats_repository;
pub mod pg_suspect_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_feedback_repository::PgFeedbackRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
pub use pg_suspect_repository::PgSuspectRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
