//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation inputs live next to the entity
//! they produce (`NewLink`, `NewClick`).
//!
//! # Entity Types
//!
//! - [`User`] - A messenger user that owns links
//! - [`Link`] - A short code mapped to a destination, with expiry
//! - [`Click`] - One resolution of a live link
//! - [`SuspectLink`] - A reported link awaiting review
//! - [`Review`] - Free-text feedback
//! - [`Summary`] - Aggregate counters

pub mod click;
pub mod feedback;
pub mod link;
pub mod summary;
pub mod suspect;
pub mod user;

pub use click::{Click, NewClick};
pub use feedback::Review;
pub use link::{Link, LinkWithClicks, NewLink};
pub use summary::Summary;
pub use suspect::{FlagOutcome, SuspectLink};
pub use user::User;
