//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_with::{DefaultOnError, serde_as};
use validator::Validate;

/// Requested link lifetime as it arrived on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validity {
    /// Absent, or not a whole number; the configured default applies.
    #[default]
    Unset,
    /// A whole number of minutes, not yet range checked.
    Minutes(i64),
    /// A whole number that does not fit in `i64`.
    OutOfRange,
}

impl Validity {
    fn from_number(number: &serde_json::Number) -> Option<Self> {
        if let Some(minutes) = number.as_i64() {
            return Some(Self::Minutes(minutes));
        }
        if number.is_u64() {
            return Some(Self::OutOfRange);
        }

        let value = number.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)?;
        // i64::MAX is not exactly representable; its f64 rounds up to 2^63.
        if value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Some(Self::Minutes(value as i64))
        } else {
            Some(Self::OutOfRange)
        }
    }
}

/// Accepts any JSON number with no fractional part, `1.0` included.
/// Everything else is an error, which [`DefaultOnError`] turns into
/// [`Validity::Unset`].
impl<'de> Deserialize<'de> for Validity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        Self::from_number(&number)
            .ok_or_else(|| D::Error::custom("validity must be a whole number of minutes"))
    }
}

/// Request to create a short link.
///
/// ```json
/// { "url": "example.com", "validity": 30, "shortcode": "abc123" }
/// ```
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// Target URL; a missing scheme is read as `http://`.
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: Option<String>,

    /// Lifetime in minutes. Values that are not whole numbers fall back to
    /// the configured default.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub validity: Validity,

    /// Optional custom short code.
    pub shortcode: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
