//! Audit trail collaborator.
//!
//! The core reports create/redirect/error events as [`AuditEntry`] values
//! through an [`AuditLogger`]. A background [`run_audit_worker`] hands them to
//! an [`AuditSink`]. Sink failures are retried, then logged and swallowed;
//! they never reach the request that produced the entry.

mod logger;
mod sink;
mod tracing_sink;
mod worker;

pub use logger::AuditLogger;
pub use sink::{AuditEntry, AuditError, AuditLevel, AuditSink};
pub use tracing_sink::TracingAuditSink;
pub use worker::run_audit_worker;

#[cfg(test)]
pub use sink::MockAuditSink;
