//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod feedback;
pub mod health;
pub mod links;
pub mod redirect;
pub mod reports;
pub mod session;
pub mod users;

pub use admin::{
    grade_handler, list_suspects_handler, resolve_suspect_handler, reviews_handler,
    summary_handler,
};
pub use feedback::{submit_grade_handler, submit_review_handler};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, list_links_handler, update_expiry_handler,
};
pub use redirect::{not_found_handler, redirect_handler};
pub use reports::report_handler;
pub use session::{
    delete_session_handler, get_session_handler, put_session_handler, take_session_handler,
};
pub use users::register_user_handler;
