//! Target URL normalization and validation.
//!
//! Scheme-less input gains an `http://` prefix; everything else is kept
//! byte-for-byte. The result must parse as an absolute web URI.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `<scheme>://` at the start of the input, per RFC 3986 scheme syntax.
static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid scheme regex"));

/// Scheme prepended to input that has none.
pub const DEFAULT_SCHEME: &str = "http://";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL contains control characters")]
    ControlCharacter,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Whether `url` contains characters that cannot appear in a `Location`
/// header. The URL parser drops embedded tabs and line breaks silently, so
/// they have to be caught on the raw string.
pub fn has_control_chars(url: &str) -> bool {
    url.chars().any(char::is_control)
}

/// Prefixes [`DEFAULT_SCHEME`] when the input carries no scheme.
///
/// ```ignore
/// assert_eq!(with_default_scheme("example.com"), "http://example.com");
/// assert_eq!(with_default_scheme("HTTPS://example.com"), "HTTPS://example.com");
/// ```
pub fn with_default_scheme(input: &str) -> String {
    if SCHEME_PREFIX.is_match(input) {
        input.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{input}")
    }
}

/// Normalizes user input into a stored target URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Control characters anywhere else are rejected
/// 3. A missing scheme becomes `http://`
/// 4. The result must parse as an absolute URL
/// 5. Only `http` and `https` are accepted, and a host is required
///
/// The returned string is the prefixed input itself, not the parser's
/// canonical form, so already-schemed URLs come back unchanged.
///
/// # Errors
///
/// See [`UrlNormalizationError`].
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }
    if has_control_chars(trimmed) {
        return Err(UrlNormalizationError::ControlCharacter);
    }

    let candidate = with_default_scheme(trimmed);
    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(candidate)
}
