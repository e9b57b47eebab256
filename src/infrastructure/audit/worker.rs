//! Background delivery of queued audit entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use super::sink::{AuditEntry, AuditSink};

/// Delivery retries after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Drains the audit queue into `sink` until every sender is dropped.
///
/// Each entry is retried with jittered exponential backoff (10ms, 100ms,
/// then capped at 1s). An entry that still fails is logged locally and
/// discarded; the worker moves on to the next one.
pub async fn run_audit_worker(mut rx: mpsc::Receiver<AuditEntry>, sink: Arc<dyn AuditSink>) {
    while let Some(entry) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(MAX_RETRIES);

        if let Err(e) = Retry::spawn(strategy, || sink.deliver(&entry)).await {
            warn!(
                category = %entry.category,
                level = %entry.level,
                "Dropping audit entry after {} retries: {}",
                MAX_RETRIES,
                e
            );
        }
    }

    debug!("Audit worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::audit::sink::{AuditError, AuditLevel, MockAuditSink};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(message: &str) -> AuditEntry {
        AuditEntry {
            origin: "backend".to_string(),
            level: AuditLevel::Info,
            category: "test".to_string(),
            message: message.to_string(),
            extras: json!({}),
        }
    }

    #[tokio::test]
    async fn test_worker_delivers_in_order() {
        let delivered = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = delivered.clone();

        let mut sink = MockAuditSink::new();
        sink.expect_deliver().times(2).returning(move |e| {
            seen.lock().unwrap().push(e.message.clone());
            Ok(())
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(entry("one")).await.unwrap();
        tx.send(entry("two")).await.unwrap();
        drop(tx);

        run_audit_worker(rx, Arc::new(sink)).await;

        assert_eq!(*delivered.lock().unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut sink = MockAuditSink::new();
        sink.expect_deliver().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AuditError::Unavailable("timeout".to_string()))
            } else {
                Ok(())
            }
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(entry("flaky")).await.unwrap();
        drop(tx);

        run_audit_worker(rx, Arc::new(sink)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_worker_gives_up_and_continues() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut sink = MockAuditSink::new();
        sink.expect_deliver().returning(move |e| {
            counter.fetch_add(1, Ordering::SeqCst);
            if e.message == "broken" {
                Err(AuditError::Rejected("bad payload".to_string()))
            } else {
                Ok(())
            }
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(entry("broken")).await.unwrap();
        tx.send(entry("fine")).await.unwrap();
        drop(tx);

        run_audit_worker(rx, Arc::new(sink)).await;

        // 1 attempt + MAX_RETRIES for the broken entry, 1 for the next one.
        assert_eq!(attempts.load(Ordering::SeqCst), MAX_RETRIES + 2);
    }
}
