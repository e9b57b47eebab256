//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{ClickEvent, Location};

/// Individual click event information.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub ts: DateTime<Utc>,
    pub referrer: String,
    pub ip: String,
    pub location: Location,
}

impl From<ClickEvent> for ClickInfo {
    fn from(event: ClickEvent) -> Self {
        Self {
            ts: event.timestamp,
            referrer: event.referrer,
            ip: event.source_ip,
            location: event.location,
        }
    }
}
