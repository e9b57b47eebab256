//! Link entity representing a short code's target and its analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::click::ClickEvent;

/// A stored short link.
///
/// Persisted field names (`url`, `clicks`, ...) match the registry file
/// document, see [`crate::infrastructure::persistence::RegistryFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    #[serde(rename = "url")]
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "clicks", default)]
    pub click_count: u64,
    #[serde(default)]
    pub events: Vec<ClickEvent>,
}

impl LinkRecord {
    /// Creates a record with no clicks.
    pub fn new(target_url: String, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            target_url,
            created_at,
            expires_at,
            click_count: 0,
            events: Vec::new(),
        }
    }

    /// Returns true once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Appends a click event and bumps the counter by exactly one.
    pub fn record_click(&mut self, event: ClickEvent) {
        self.events.push(event);
        self.click_count += 1;
    }
}

impl From<NewLink> for LinkRecord {
    fn from(new_link: NewLink) -> Self {
        LinkRecord::new(new_link.target_url, new_link.created_at, new_link.expires_at)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A record together with the code it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub record: LinkRecord,
}

impl ShortLink {
    pub fn new(code: impl Into<String>, record: LinkRecord) -> Self {
        Self {
            code: code.into(),
            record,
        }
    }
}
