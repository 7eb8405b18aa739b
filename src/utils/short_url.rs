//! Building public short URLs and reading codes back out of them.

use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::utils::code_generator::is_well_formed;

/// Public URL for `code` under `base_url`.
pub fn build_short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

/// Extracts the short code from a bare code or a short URL of this service.
///
/// Accepts `code`, `host/code` and `scheme://host/code`. The host must match
/// the host (and port, if any) of `base_url`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the input points elsewhere or the code is malformed.
pub fn extract_code(input: &str, base_url: &str) -> Result<String, AppError> {
    let input = input.trim();

    let code = match input.split_once("://") {
        Some((_, rest)) => path_code(rest, base_url, input)?,
        None if input.contains('/') => path_code(input, base_url, input)?,
        None => input,
    };

    if !is_well_formed(code) {
        return Err(AppError::bad_request(
            "Not a short link",
            json!({ "link": input }),
        ));
    }

    Ok(code.to_string())
}

fn path_code<'a>(without_scheme: &'a str, base_url: &str, input: &str) -> Result<&'a str, AppError> {
    let (authority, path) = without_scheme
        .split_once('/')
        .unwrap_or((without_scheme, ""));

    let expected = authority_of(base_url);
    if expected.as_deref() != Some(authority.to_ascii_lowercase().as_str()) {
        return Err(AppError::bad_request(
            "Link does not belong to this service",
            json!({ "link": input, "expected_host": expected }),
        ));
    }

    Ok(path.trim_end_matches('/'))
}

fn authority_of(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}
