//! Link creation and redirect service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewLink, ShortLink, Visit};
use crate::domain::repositories::LinkRepository;
use crate::domain::resolver::Resolution;
use crate::error::AppError;
use crate::infrastructure::audit::AuditLogger;
use crate::utils::code_generator::CodeSource;
use crate::utils::url_normalizer::normalize_url;

/// Tunables applied to every new link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Validity used when the request names none.
    pub default_validity_minutes: i64,
    /// Length of generated codes.
    pub code_length: usize,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            default_validity_minutes: 30,
            code_length: 6,
        }
    }
}

/// Service for creating short links and following them.
pub struct LinkService<R: LinkRepository> {
    repository: Arc<R>,
    audit: AuditLogger,
    policy: LinkPolicy,
}

impl<R: LinkRepository> LinkService<R> {
    pub fn new(repository: Arc<R>, audit: AuditLogger, policy: LinkPolicy) -> Self {
        Self {
            repository,
            audit,
            policy,
        }
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `url` - Target URL; `http://` is prepended when no scheme is given
    /// - `validity_minutes` - Lifetime of the link, policy default when `None`
    /// - `custom_code` - Caller-chosen code; blank counts as absent
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is empty or malformed
    /// - Validity is not a positive number of minutes
    /// - Custom code is malformed or reserved
    ///
    /// Returns [`AppError::Conflict`] if the custom code already exists.
    /// Returns [`AppError::Storage`] if the registry could not be saved.
    pub async fn create_short_link(
        &self,
        url: &str,
        validity_minutes: Option<i64>,
        custom_code: Option<String>,
    ) -> Result<ShortLink, AppError> {
        let target_url = normalize_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let now = Utc::now();
        let minutes = validity_minutes.unwrap_or(self.policy.default_validity_minutes);
        let expires_at = expiry_after(now, minutes)?;

        let source = CodeSource::from_request(custom_code, self.policy.code_length);
        let link = self
            .repository
            .create(
                source,
                NewLink {
                    target_url,
                    created_at: now,
                    expires_at,
                },
            )
            .await?;

        metrics::counter!("links_created_total").increment(1);
        info!(code = %link.code, "Short link created");
        self.audit.info(
            "create",
            "short url created",
            json!({
                "shortcode": link.code,
                "url": link.record.target_url,
                "expiresAt": link.record.expires_at,
            }),
        );

        Ok(link)
    }

    /// Resolves `code` for a redirect and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Gone`] if the link has expired; no click is recorded.
    /// Returns [`AppError::Storage`] if the stored target cannot be used as a
    /// redirect; no click is recorded.
    pub async fn follow(&self, code: &str, visit: Visit) -> Result<String, AppError> {
        let resolution = self
            .repository
            .record_click(code, Utc::now(), visit)
            .await?;

        metrics::counter!("redirects_total", "outcome" => resolution.outcome()).increment(1);

        match resolution {
            Resolution::Found(url) => {
                debug!(code = %code, "Redirecting");
                self.audit.info(
                    "redirect",
                    "redirecting",
                    json!({ "shortcode": code, "to": url }),
                );
                Ok(url)
            }
            Resolution::Expired { expires_at } => {
                self.audit
                    .warn("redirect", "expired access", json!({ "shortcode": code }));
                Err(AppError::gone(
                    "Short link has expired",
                    json!({ "code": code, "expiresAt": expires_at }),
                ))
            }
            Resolution::Unroutable => {
                warn!(code = %code, "Stored target URL is not a valid redirect");
                self.audit
                    .error("redirect", "unroutable target", json!({ "shortcode": code }));
                Err(AppError::storage(
                    "Stored target URL cannot be redirected to",
                    json!({ "code": code }),
                ))
            }
            Resolution::NotFound => Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            )),
        }
    }

    /// Builds the public short URL for `code` under `base`.
    pub fn short_url(&self, base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }
}

/// Computes the expiry `minutes` after `now`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for non-positive or unrepresentable values.
pub fn expiry_after(now: DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>, AppError> {
    if minutes <= 0 {
        return Err(AppError::bad_request(
            "Validity must be a positive number of minutes",
            json!({ "validity": minutes }),
        ));
    }

    Duration::try_minutes(minutes)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| {
            AppError::bad_request("Validity is too large", json!({ "validity": minutes }))
        })
}
