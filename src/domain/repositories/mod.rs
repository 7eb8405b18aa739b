//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by concrete
//! repositories in `crate::infrastructure::persistence`. Mock implementations
//! are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Link owners
//! - [`LinkRepository`] - Short links with expiry
//! - [`StatsRepository`] - Click tracking and summary counters
//! - [`SuspectRepository`] - Moderation flags
//! - [`FeedbackRepository`] - Grades and reviews
//! - [`TokenRepository`] - API token authentication

pub mod feedback_repository;
pub mod link_repository;
pub mod stats_repository;
pub mod suspect_repository;
pub mod token_repository;
pub mod user_repository;

pub use feedback_repository::FeedbackRepository;
pub use link_repository::{LinkRepository, SHORT_CODE_CONSTRAINT};
pub use stats_repository::StatsRepository;
pub use suspect_repository::SuspectRepository;
pub use token_repository::{ApiToken, TokenRepository, TokenRole};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
#[cfg(test)]
pub use suspect_repository::MockSuspectRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
