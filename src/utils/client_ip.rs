//! Caller address extraction for click telemetry.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Returns the client IP without port.
///
/// When `behind_proxy` is set, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`; otherwise proxy headers are ignored because clients can forge them.
/// A header value that is not an IP address is skipped.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        let forwarded = header_str(headers, "x-forwarded-for")
            .and_then(|value| value.split(',').next())
            .and_then(parse_ip);

        if let Some(ip) = forwarded.or_else(|| header_str(headers, "x-real-ip").and_then(parse_ip)) {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

fn parse_ip(value: &str) -> Option<IpAddr> {
    value.trim().parse::<IpAddr>().ok()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> Option<SocketAddr> {
        Some("203.0.113.7:51234".parse().unwrap())
    }

    #[test]
    fn test_uses_peer_address_without_port() {
        assert_eq!(
            client_ip(&HeaderMap::new(), peer(), false).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_ignores_forwarded_headers_when_not_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1".parse().unwrap());

        assert_eq!(
            client_ip(&headers, peer(), false).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_first_forwarded_entry_wins_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.1, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "10.9.9.9".parse().unwrap());

        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("198.51.100.1")
        );
    }

    #[test]
    fn test_falls_back_to_real_ip_then_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());

        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("198.51.100.2")
        );
        assert_eq!(
            client_ip(&HeaderMap::new(), peer(), true).as_deref(),
            Some("203.0.113.7")
        );
        assert_eq!(client_ip(&HeaderMap::new(), None, true), None);
    }

    #[test]
    fn test_skips_forwarded_values_that_are_not_addresses() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "x".repeat(60).parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.3".parse().unwrap());

        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("198.51.100.3")
        );

        headers.insert("x-real-ip", "not-an-ip".parse().unwrap());
        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_normalises_ipv6_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", " 2001:DB8::1 , 10.0.0.1".parse().unwrap());

        let ip = client_ip(&headers, peer(), true).unwrap();
        assert_eq!(ip, "2001:db8::1");
        assert!(ip.len() <= 45);
    }
}
