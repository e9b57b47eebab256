//! Audit sink writing to the local `audit` log target.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::sink::{AuditEntry, AuditError, AuditLevel, AuditSink};

/// An audit sink that emits each entry as a tracing event.
///
/// Used when no remote audit service is wired in. Delivery never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        debug!("Using TracingAuditSink (audit entries go to the log)");
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn deliver(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let AuditEntry {
            origin,
            level,
            category,
            message,
            extras,
        } = entry;

        match level {
            AuditLevel::Debug => {
                debug!(target: "audit", %origin, %category, %extras, "{}", message)
            }
            AuditLevel::Info => {
                info!(target: "audit", %origin, %category, %extras, "{}", message)
            }
            AuditLevel::Warn => {
                warn!(target: "audit", %origin, %category, %extras, "{}", message)
            }
            AuditLevel::Error | AuditLevel::Fatal => {
                error!(target: "audit", %origin, %category, %level, %extras, "{}", message)
            }
        }

        Ok(())
    }
}
