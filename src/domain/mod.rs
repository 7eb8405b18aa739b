//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces, the click pipeline and the session
//! store, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//! - [`session`] - Per-user conversational state with expiry
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves a live link
//! 2. [`click_event::ClickEvent`] is offered to a bounded channel (never awaited)
//! 3. [`click_worker::run_click_worker`] persists events with retry logic
//! 4. Click data is stored via [`repositories::StatsRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod session;
