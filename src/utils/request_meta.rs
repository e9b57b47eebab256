//! Request metadata extraction: public origin, client IP and referrer.

use std::net::SocketAddr;

use axum::http::{HeaderMap, header};
use serde_json::json;

use crate::AppError;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_REAL_IP: &str = "x-real-ip";

/// Builds `scheme://host[:port]` for the request as the client addressed it.
///
/// The host comes from the `Host` header with its port kept. The scheme is
/// `http` unless `behind_proxy` is set and the proxy reported another one via
/// `X-Forwarded-Proto`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:4000".parse().unwrap());
///
/// assert_eq!(request_origin(&headers, false).unwrap(), "http://sho.rt:4000");
/// ```
pub fn request_origin(headers: &HeaderMap, behind_proxy: bool) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header", json!({})));
    }

    let scheme = behind_proxy
        .then(|| first_header_value(headers, X_FORWARDED_PROTO))
        .flatten()
        .filter(|s| s.eq_ignore_ascii_case("https") || s.eq_ignore_ascii_case("http"))
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_else(|| "http".to_string());

    Ok(format!("{scheme}://{host}"))
}

/// Resolves the client IP for analytics.
///
/// With `behind_proxy`, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`; otherwise, and as a fallback, the peer socket address.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy
        && let Some(ip) = first_header_value(headers, X_FORWARDED_FOR)
            .or_else(|| first_header_value(headers, X_REAL_IP))
    {
        return ip;
    }

    peer.ip().to_string()
}

/// Returns the `Referer` header if present and valid UTF-8.
pub fn referrer(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::REFERER).and_then(|v| v.to_str().ok())
}

fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn peer() -> SocketAddr {
        "198.51.100.9:40000".parse().unwrap()
    }

    #[test]
    fn test_origin_simple() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        assert_eq!(
            request_origin(&headers, false).unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_origin_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:4000"));

        assert_eq!(
            request_origin(&headers, false).unwrap(),
            "http://localhost:4000"
        );
    }

    #[test]
    fn test_origin_forwarded_proto_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("https"));

        assert_eq!(request_origin(&headers, true).unwrap(), "https://sho.rt");
        assert_eq!(request_origin(&headers, false).unwrap(), "http://sho.rt");
    }

    #[test]
    fn test_origin_ignores_unknown_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("gopher"));

        assert_eq!(request_origin(&headers, true).unwrap(), "http://sho.rt");
    }

    #[test]
    fn test_origin_missing_host_header() {
        let headers = HeaderMap::new();

        let result = request_origin(&headers, false);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_origin_invalid_utf8() {
        let mut headers = HeaderMap::new();
        let invalid_bytes = vec![0xFF, 0xFE, 0xFD];
        if let Ok(header_value) = HeaderValue::from_bytes(&invalid_bytes) {
            headers.insert(header::HOST, header_value);

            assert!(request_origin(&headers, false).is_err());
        }
    }

    #[test]
    fn test_client_ip_uses_peer_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.1"));

        assert_eq!(client_ip(&headers, peer(), false), "198.51.100.9");
    }

    #[test]
    fn test_client_ip_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.1, 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers, peer(), true), "203.0.113.1");
    }

    #[test]
    fn test_client_ip_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("203.0.113.5"));

        assert_eq!(client_ip(&headers, peer(), true), "203.0.113.5");
        assert_eq!(client_ip(&HeaderMap::new(), peer(), true), "198.51.100.9");
    }

    #[test]
    fn test_referrer() {
        let mut headers = HeaderMap::new();
        assert_eq!(referrer(&headers), None);

        headers.insert(header::REFERER, HeaderValue::from_static("https://google.com"));
        assert_eq!(referrer(&headers), Some("https://google.com"));
    }
}
