//! Redirect target normalisation.

use std::borrow::Cow;

/// Prefixes `http://` when the stored destination has no HTTP scheme.
///
/// Users often submit `example.com/page`; browsers need an absolute URL in `Location`.
pub fn with_scheme(url: &str) -> Cow<'_, str> {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();

    if lower.starts_with("http://") || lower.starts_with("https://") {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("http://{url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(with_scheme("https://example.com"), "https://example.com");
        assert_eq!(with_scheme("http://example.com/x"), "http://example.com/x");
        assert_eq!(with_scheme("HTTPS://EXAMPLE.COM"), "HTTPS://EXAMPLE.COM");
    }

    #[test]
    fn test_adds_http_when_missing() {
        assert_eq!(with_scheme("example.com/page"), "http://example.com/page");
        assert_eq!(with_scheme("ftp://files.org"), "http://ftp://files.org");
    }
}
