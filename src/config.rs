//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! All variables are optional.
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:4000`)
//! - `DATA_FILE` - Registry document path (default: `data/urls.json`)
//! - `PUBLIC_BASE_URL` - Base for returned short links, e.g. `https://s.example.com`
//!   (default: derived from each request's scheme and `Host`)
//! - `DEFAULT_VALIDITY_MINUTES` - Lifetime of links created without `validity` (default: 30)
//! - `CODE_LENGTH` - Length of generated codes (default: 6, range: 3-30)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-*` headers (default: `false`)
//! - `AUDIT_ORIGIN` - Origin stamped on server audit entries (default: `backend`)
//! - `AUDIT_QUEUE_CAPACITY` - Audit entry buffer size (default: 1000, min: 10)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ```bash
//! export LISTEN="127.0.0.1:4000"
//! export DATA_FILE="/var/lib/shorturls/urls.json"
//! export PUBLIC_BASE_URL="https://s.example.com"
//! ```

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

use crate::application::services::LinkPolicy;
use crate::utils::code_generator::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub data_file: PathBuf,
    /// Fixed origin for short links. Trailing slashes are stripped.
    pub public_base_url: Option<String>,
    pub default_validity_minutes: i64,
    pub code_length: usize,
    /// When true, client IP and scheme are read from X-Forwarded-For / X-Real-IP /
    /// X-Forwarded-Proto. Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub audit_origin: String,
    pub audit_queue_capacity: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        let policy = LinkPolicy::default();
        Self {
            listen_addr: "0.0.0.0:4000".to_string(),
            data_file: PathBuf::from("data/urls.json"),
            public_base_url: None,
            default_validity_minutes: policy.default_validity_minutes,
            code_length: policy.code_length,
            behind_proxy: false,
            audit_origin: "backend".to_string(),
            audit_queue_capacity: 1_000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but not a number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let default_validity_minutes = parse_var("DEFAULT_VALIDITY_MINUTES")?
            .unwrap_or(defaults.default_validity_minutes);
        let code_length = parse_var("CODE_LENGTH")?.unwrap_or(defaults.code_length);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.behind_proxy);

        let audit_origin = env::var("AUDIT_ORIGIN").unwrap_or(defaults.audit_origin);
        let audit_queue_capacity =
            parse_var("AUDIT_QUEUE_CAPACITY")?.unwrap_or(defaults.audit_queue_capacity);

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            listen_addr,
            data_file,
            public_base_url,
            default_validity_minutes,
            code_length,
            behind_proxy,
            audit_origin,
            audit_queue_capacity,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default_validity_minutes` is not positive
    /// - `code_length` is outside 3-30
    /// - `audit_queue_capacity` is outside 10-1000000
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `public_base_url` is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.default_validity_minutes <= 0 {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be greater than 0, got {}",
                self.default_validity_minutes
            );
        }

        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                self.code_length
            );
        }

        if self.audit_queue_capacity < 10 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY must be at least 10, got {}",
                self.audit_queue_capacity
            );
        }

        if self.audit_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.audit_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref base) = self.public_base_url {
            let parsed = Url::parse(base)
                .with_context(|| format!("PUBLIC_BASE_URL is not a valid URL: '{}'", base))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!(
                    "PUBLIC_BASE_URL must start with 'http://' or 'https://', got '{}'",
                    base
                );
            }
        }

        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("DATA_FILE must not be empty");
        }

        Ok(())
    }

    /// Link tunables handed to the link service.
    pub fn link_policy(&self) -> LinkPolicy {
        LinkPolicy {
            default_validity_minutes: self.default_validity_minutes,
            code_length: self.code_length,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Data file: {}", self.data_file.display());
        match self.public_base_url {
            Some(ref base) => tracing::info!("  Public base URL: {}", base),
            None => tracing::info!("  Public base URL: from request Host"),
        }
        tracing::info!(
            "  Default validity: {} min, code length: {}",
            self.default_validity_minutes,
            self.code_length
        );
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Audit queue capacity: {}", self.audit_queue_capacity);
    }
}

/// Parses an optional numeric variable; an unset variable is `None`.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
