//! Business logic services for the application layer.

pub mod auth_service;
pub mod feedback_service;
pub mod link_service;
pub mod moderation_service;

pub use auth_service::AuthService;
pub use feedback_service::FeedbackService;
pub use link_service::{LinkPolicy, LinkService};
pub use moderation_service::ModerationService;
