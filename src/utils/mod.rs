//! Utility functions for code generation, URL handling and request metadata.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Destination URL acceptance
//! - [`destination`] - Redirect target normalisation
//! - [`expiry`] - Expiry date parsing
//! - [`short_url`] - Short URL building and code extraction
//! - [`client_ip`] - Caller address extraction

pub mod client_ip;
pub mod code_generator;
pub mod destination;
pub mod expiry;
pub mod short_url;
pub mod url_validator;
