//! Non-blocking handle for emitting audit entries.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

use super::sink::{AuditEntry, AuditLevel};

/// Cheap, cloneable front of the audit queue.
///
/// Entries are pushed with `try_send`: when the queue is full or the worker
/// is gone the entry is dropped, so logging never waits on the sink.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    origin: Arc<str>,
    sender: mpsc::Sender<AuditEntry>,
}

impl AuditLogger {
    pub fn new(origin: impl Into<String>, sender: mpsc::Sender<AuditEntry>) -> Self {
        Self {
            origin: Arc::from(origin.into()),
            sender,
        }
    }

    /// Creates a logger together with the receiving end of a bounded queue.
    pub fn channel(
        origin: impl Into<String>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<AuditEntry>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(origin, tx), rx)
    }

    pub fn info(&self, category: &str, message: &str, extras: Value) {
        self.log(AuditLevel::Info, category, message, extras);
    }

    pub fn warn(&self, category: &str, message: &str, extras: Value) {
        self.log(AuditLevel::Warn, category, message, extras);
    }

    pub fn error(&self, category: &str, message: &str, extras: Value) {
        self.log(AuditLevel::Error, category, message, extras);
    }

    /// Queues an entry tagged with this logger's origin.
    pub fn log(&self, level: AuditLevel, category: &str, message: &str, extras: Value) {
        self.submit(AuditEntry {
            origin: self.origin.to_string(),
            level,
            category: category.to_string(),
            message: message.to_string(),
            extras,
        });
    }

    /// Queues a fully formed entry, keeping its own origin.
    pub fn submit(&self, entry: AuditEntry) {
        match self.sender.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                debug!(category = %entry.category, "Audit queue full, dropping entry");
            }
            Err(TrySendError::Closed(entry)) => {
                debug!(category = %entry.category, "Audit queue closed, dropping entry");
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_tags_origin() {
        let (logger, mut rx) = AuditLogger::channel("backend", 10);

        logger.info("create", "short url created", json!({ "code": "abc" }));

        let entry = rx.recv().await.unwrap();
        assert_eq!(entry.origin, "backend");
        assert_eq!(entry.level, AuditLevel::Info);
        assert_eq!(entry.category, "create");
        assert_eq!(entry.extras["code"], "abc");
    }

    #[tokio::test]
    async fn test_submit_keeps_entry_origin() {
        let (logger, mut rx) = AuditLogger::channel("backend", 10);

        logger.submit(AuditEntry {
            origin: "frontend".to_string(),
            level: AuditLevel::Debug,
            category: "client".to_string(),
            message: "clicked".to_string(),
            extras: json!({}),
        });

        assert_eq!(rx.recv().await.unwrap().origin, "frontend");
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (logger, mut rx) = AuditLogger::channel("backend", 1);

        logger.warn("redirect", "first", json!({}));
        logger.warn("redirect", "second", json!({}));

        assert_eq!(rx.try_recv().unwrap().message, "first");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_queue_is_reported() {
        let (logger, rx) = AuditLogger::channel("backend", 1);
        drop(rx);

        logger.error("db", "write failed", json!({}));
        assert!(logger.is_closed());
    }
}
