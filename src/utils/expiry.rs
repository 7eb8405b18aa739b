//! Parsing of user-supplied expiry dates.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::error::AppError;

/// Day-first date format used by the chat front-end.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parses an RFC 3339 timestamp or a `DD-MM-YYYY` date (midnight UTC).
///
/// # Errors
///
/// Returns [`AppError::Validation`] for anything else.
pub fn parse_expiry(input: &str) -> Result<DateTime<Utc>, AppError> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::bad_request(
                "Invalid expiry date, expected DD-MM-YYYY or RFC 3339",
                json!({ "expires_at": input }),
            )
        })
}
