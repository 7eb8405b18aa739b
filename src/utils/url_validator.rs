//! Syntactic validation of user-supplied destination URLs.
//!
//! A URL is accepted if it either looks like a bare `host.tld[:port][/path]`
//! or parses as an absolute URL with a host. No network access is made.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Longest destination accepted.
pub const MAX_URL_LENGTH: usize = 2048;

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(:\d+)?(/[^\s]*)?$")
        .unwrap_or_else(|e| panic!("invalid bare URL pattern: {e}"))
});

/// Returns true if `input` is an acceptable destination.
pub fn is_valid_url(input: &str) -> bool {
    let candidate = input.trim();

    if candidate.is_empty() || candidate.len() > MAX_URL_LENGTH {
        return false;
    }

    BARE_URL.is_match(candidate) || has_host(candidate)
}

/// Validates `input` and returns it trimmed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL is empty, too long or has no domain.
pub fn validate_url(input: &str) -> Result<String, AppError> {
    let candidate = input.trim();

    if candidate.len() > MAX_URL_LENGTH {
        return Err(AppError::bad_request(
            "URL is too long",
            json!({ "max_length": MAX_URL_LENGTH, "length": candidate.len() }),
        ));
    }

    if !is_valid_url(candidate) {
        return Err(AppError::bad_request(
            "Invalid URL",
            json!({ "url": candidate }),
        ));
    }

    Ok(candidate.to_string())
}

fn has_host(candidate: &str) -> bool {
    Url::parse(candidate)
        .ok()
        .and_then(|url| url.host_str().map(|h| !h.is_empty()))
        .unwrap_or(false)
}
