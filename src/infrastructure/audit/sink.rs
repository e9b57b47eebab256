//! Audit sink trait and entry types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Errors a sink can report while delivering an entry.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),

    #[error("Audit delivery rejected: {0}")]
    Rejected(String),
}

/// Severity of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditLevel::Debug => "debug",
            AuditLevel::Info => "info",
            AuditLevel::Warn => "warn",
            AuditLevel::Error => "error",
            AuditLevel::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

impl FromStr for AuditLevel {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(AuditLevel::Debug),
            "info" => Ok(AuditLevel::Info),
            "warn" | "warning" => Ok(AuditLevel::Warn),
            "error" => Ok(AuditLevel::Error),
            "fatal" => Ok(AuditLevel::Fatal),
            other => Err(AuditError::Rejected(format!("unknown level '{other}'"))),
        }
    }
}

/// One entry of the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// Which side produced the entry, e.g. `backend` or `frontend`.
    pub origin: String,
    pub level: AuditLevel,
    /// Functional area, e.g. `create`, `redirect`, `db`.
    pub category: String,
    pub message: String,
    pub extras: Value,
}

/// Destination of audit entries.
///
/// Implementations may fail; callers never surface those failures to users.
///
/// # Implementations
///
/// - [`crate::infrastructure::audit::TracingAuditSink`] - Writes entries to the `audit` log target
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Delivers a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the entry could not be delivered.
    async fn deliver(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}
