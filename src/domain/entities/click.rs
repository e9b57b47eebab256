//! Click entity representing a single successful redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::ip_bucket::coarse_location;

/// Referrer recorded when the request carried no `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

/// Privacy-reduced location label derived from the client IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
}

/// A click event recorded when a short link redirects.
///
/// Events are owned by their [`super::LinkRecord`] and only ever appended,
/// so their order in the record is their chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    /// Source IP as observed by the server; empty when unknown.
    #[serde(rename = "ip")]
    pub source_ip: String,
    pub location: Location,
}

impl ClickEvent {
    /// Builds the event for a visit at `timestamp`, deriving the coarse
    /// location bucket from the source IP.
    pub fn new(timestamp: DateTime<Utc>, visit: &Visit) -> Self {
        let referrer = visit
            .referrer
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DIRECT_REFERRER)
            .to_string();

        Self {
            timestamp,
            referrer,
            source_ip: visit.ip.clone(),
            location: Location {
                label: coarse_location(&visit.ip),
            },
        }
    }

    pub fn location_label(&self) -> &str {
        &self.location.label
    }
}

/// Request metadata captured by the redirect handler.
#[derive(Debug, Clone, Default)]
pub struct Visit {
    pub ip: String,
    pub referrer: Option<String>,
}

impl Visit {
    pub fn new(ip: impl Into<String>, referrer: Option<&str>) -> Self {
        Self {
            ip: ip.into(),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}
