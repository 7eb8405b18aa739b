//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules, and
//! give HTTP handlers and the admin CLI a narrow API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Allocation, resolution and link lifecycle
//! - [`services::moderation_service::ModerationService`] - Reports, suspects and summary
//! - [`services::feedback_service::FeedbackService`] - Grades and reviews
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
