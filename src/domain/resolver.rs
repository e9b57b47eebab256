//! Expiry-aware short code resolution.

use chrono::{DateTime, Utc};

use crate::domain::entities::Registry;
use crate::utils::url_normalizer::has_control_chars;

/// Outcome of looking up a code at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No record is stored under the code.
    NotFound,
    /// The record exists but `now` is past its expiry.
    Expired { expires_at: DateTime<Utc> },
    /// The record is live but its target cannot be sent as a redirect.
    Unroutable,
    /// The record is live; carries the target URL.
    Found(String),
}

impl Resolution {
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::NotFound => "not_found",
            Resolution::Expired { .. } => "expired",
            Resolution::Unroutable => "unroutable",
            Resolution::Found(_) => "found",
        }
    }
}

/// Resolves `code` against the registry.
///
/// Expired records are left in place; only the caller decides what to do
/// with an [`Resolution::Expired`] outcome.
pub fn resolve(registry: &Registry, code: &str, now: DateTime<Utc>) -> Resolution {
    match registry.get(code) {
        None => Resolution::NotFound,
        Some(record) if record.is_expired_at(now) => Resolution::Expired {
            expires_at: record.expires_at,
        },
        Some(record) if has_control_chars(&record.target_url) => Resolution::Unroutable,
        Some(record) => Resolution::Found(record.target_url.clone()),
    }
}
