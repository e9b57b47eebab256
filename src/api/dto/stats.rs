//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::domain::entities::{LinkRecord, ShortLink};

/// A stored link with its full click history.
///
/// Returned by both the single-link lookup and the listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetails {
    pub shortcode: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: u64,
    pub events: Vec<ClickInfo>,
}

impl LinkDetails {
    pub fn new(shortcode: impl Into<String>, record: LinkRecord) -> Self {
        Self {
            shortcode: shortcode.into(),
            url: record.target_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            clicks: record.click_count,
            events: record.events.into_iter().map(ClickInfo::from).collect(),
        }
    }
}

impl From<ShortLink> for LinkDetails {
    fn from(link: ShortLink) -> Self {
        Self::new(link.code, link.record)
    }
}
