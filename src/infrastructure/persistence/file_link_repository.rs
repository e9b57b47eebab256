//! Registry held in memory and mirrored to a JSON file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::registry_file::{RegistryFile, StorageError};
use crate::domain::entities::{ClickEvent, LinkRecord, NewLink, Registry, ShortLink, Visit};
use crate::domain::repositories::LinkRepository;
use crate::domain::resolver::{Resolution, resolve};
use crate::error::AppError;
use crate::infrastructure::audit::AuditLogger;
use crate::utils::code_generator::CodeSource;

/// Link repository over a single owned [`Registry`].
///
/// One `RwLock` guards the registry. Mutations hold the write lock across
/// check, mutation and save, which makes code claiming atomic, keeps click
/// increments from being lost, and serializes file writes so the document
/// always matches the newest state. Reads share the lock.
pub struct FileLinkRepository {
    file: RegistryFile,
    registry: RwLock<Registry>,
    audit: AuditLogger,
}

impl FileLinkRepository {
    /// Loads the registry from `file` and wraps it.
    ///
    /// Loading fails soft, see [`load`].
    pub async fn open(file: RegistryFile, audit: AuditLogger) -> Self {
        let registry = load(&file, &audit).await;
        Self::with_registry(file, registry, audit)
    }

    /// Wraps an already loaded registry.
    pub fn with_registry(file: RegistryFile, registry: Registry, audit: AuditLogger) -> Self {
        Self {
            file,
            registry: RwLock::new(registry),
            audit,
        }
    }

    async fn persist(&self, registry: &Registry) -> Result<(), StorageError> {
        let result = self.file.save(registry).await;

        if let Err(e) = &result {
            metrics::counter!("registry_save_failures_total").increment(1);
            error!(path = %self.file.path().display(), "Registry write failed: {}", e);
            self.audit
                .error("db", "write failed", json!({ "error": e.to_string() }));
        }

        result
    }
}

/// Reads the registry document, never failing.
///
/// A missing document yields an empty registry. A document that cannot be
/// read or parsed is reported, moved aside to `<file>.corrupt` so the next
/// save cannot clobber it, and replaced by an empty registry.
pub async fn load(file: &RegistryFile, audit: &AuditLogger) -> Registry {
    match file.read().await {
        Ok(Some(registry)) => {
            info!(
                path = %file.path().display(),
                links = registry.len(),
                "Registry loaded"
            );
            registry
        }
        Ok(None) => {
            info!(path = %file.path().display(), "No registry file yet, starting empty");
            Registry::new()
        }
        Err(e) => {
            error!("Registry load failed, starting empty: {}", e);
            audit.error("db", "read failed", json!({ "error": e.to_string() }));

            match file.quarantine().await {
                Ok(moved) => warn!(to = %moved.display(), "Unreadable registry moved aside"),
                Err(qe) => error!("Could not move unreadable registry aside: {}", qe),
            }

            Registry::new()
        }
    }
}

#[async_trait]
impl LinkRepository for FileLinkRepository {
    async fn create(&self, source: CodeSource, new_link: NewLink) -> Result<ShortLink, AppError> {
        let mut registry = self.registry.write().await;

        let code = source.claim(|candidate| registry.contains(candidate))?;
        let record = LinkRecord::from(new_link);

        if !registry.insert_new(code.clone(), record.clone()) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": code }),
            ));
        }

        self.persist(&registry).await?;

        Ok(ShortLink::new(code, record))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.registry.read().await.get(code).cloned())
    }

    async fn list(&self) -> Result<Vec<ShortLink>, AppError> {
        Ok(self.registry.read().await.links())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.registry.read().await.len())
    }

    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
        visit: Visit,
    ) -> Result<Resolution, AppError> {
        let mut registry = self.registry.write().await;

        let resolution = resolve(&registry, code, now);
        if !matches!(resolution, Resolution::Found(_)) {
            return Ok(resolution);
        }

        let Some(record) = registry.get_mut(code) else {
            return Ok(Resolution::NotFound);
        };
        record.record_click(ClickEvent::new(now, &visit));

        // The in-memory click stands even if the write fails.
        let _ = self.persist(&registry).await;

        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn new_link(minutes: i64) -> NewLink {
        let now = Utc::now();
        NewLink {
            target_url: "http://example.com".to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(minutes),
        }
    }

    async fn open_repo(dir: &tempfile::TempDir) -> FileLinkRepository {
        let (audit, _rx) = AuditLogger::channel("test", 100);
        FileLinkRepository::open(RegistryFile::new(dir.path().join("urls.json")), audit).await
    }

    #[tokio::test]
    async fn test_create_explicit_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        let link = repo
            .create(CodeSource::Explicit("abc123".to_string()), new_link(30))
            .await
            .unwrap();

        assert_eq!(link.code, "abc123");
        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found.target_url, "http://example.com");
        assert_eq!(found.click_count, 0);
    }

    #[tokio::test]
    async fn test_create_explicit_collision() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        repo.create(CodeSource::Explicit("taken".to_string()), new_link(30))
            .await
            .unwrap();
        let err = repo
            .create(CodeSource::Explicit("taken".to_string()), new_link(30))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_random_codes_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        for _ in 0..50 {
            let link = repo
                .create(CodeSource::Random { length: 6 }, new_link(30))
                .await
                .unwrap();
            assert_eq!(link.code.len(), 6);
        }

        assert_eq!(repo.count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        {
            let repo = open_repo(&dir).await;
            repo.create(CodeSource::Explicit("keep".to_string()), new_link(30))
                .await
                .unwrap();
            repo.record_click("keep", Utc::now(), Visit::new("10.2.3.4", None))
                .await
                .unwrap();
        }

        let reopened = open_repo(&dir).await;
        let record = reopened.find_by_code("keep").await.unwrap().unwrap();

        assert_eq!(record.click_count, 1);
        assert_eq!(record.events[0].location_label(), "10.2.x.x");
    }

    #[tokio::test]
    async fn test_record_click_counts_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;
        repo.create(CodeSource::Explicit("hits".to_string()), new_link(30))
            .await
            .unwrap();

        let start = Utc::now();
        for i in 0..5 {
            let resolution = repo
                .record_click("hits", start + Duration::seconds(i), Visit::default())
                .await
                .unwrap();
            assert_eq!(
                resolution,
                Resolution::Found("http://example.com".to_string())
            );
        }

        let record = repo.find_by_code("hits").await.unwrap().unwrap();
        assert_eq!(record.click_count, 5);
        assert_eq!(record.events.len(), 5);
        assert!(
            record
                .events
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp)
        );
    }

    #[tokio::test]
    async fn test_record_click_expired_leaves_record_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;
        repo.create(CodeSource::Explicit("old".to_string()), new_link(1))
            .await
            .unwrap();

        let later = Utc::now() + Duration::minutes(2);
        let resolution = repo
            .record_click("old", later, Visit::new("10.0.0.1", None))
            .await
            .unwrap();

        assert!(matches!(resolution, Resolution::Expired { .. }));
        let record = repo.find_by_code("old").await.unwrap().unwrap();
        assert_eq!(record.click_count, 0);
        assert!(record.events.is_empty());
    }

    #[tokio::test]
    async fn test_record_click_unknown_code() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        let resolution = repo
            .record_click("nope", Utc::now(), Visit::default())
            .await
            .unwrap();

        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_same_code_one_wins() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(open_repo(&dir).await);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(CodeSource::Explicit("dup".to_string()), new_link(30))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_clicks_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(open_repo(&dir).await);
        repo.create(CodeSource::Explicit("busy".to_string()), new_link(30))
            .await
            .unwrap();

        let handles: Vec<_> = (0..40)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.record_click("busy", Utc::now(), Visit::default())
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = repo.find_by_code("busy").await.unwrap().unwrap();
        assert_eq!(record.click_count, 40);
        assert_eq!(record.events.len(), 40);

        let on_disk = RegistryFile::new(dir.path().join("urls.json"))
            .read()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(on_disk.get("busy").unwrap().click_count, 40);
    }

    #[tokio::test]
    async fn test_load_quarantines_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        std::fs::write(&path, "{ broken").unwrap();

        let (audit, mut rx) = AuditLogger::channel("test", 10);
        let registry = load(&RegistryFile::new(&path), &audit).await;

        assert!(registry.is_empty());
        assert!(dir.path().join("urls.json.corrupt").exists());
        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.category, "db");
        assert_eq!(entry.message, "read failed");
    }

    #[tokio::test]
    async fn test_load_quarantines_file_that_cannot_be_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("links"), "kept").unwrap();

        let (audit, _rx) = AuditLogger::channel("test", 10);
        let file = RegistryFile::new(&path);
        let registry = load(&file, &audit).await;

        assert!(registry.is_empty());
        let moved = dir.path().join("urls.json.corrupt");
        assert_eq!(std::fs::read_to_string(moved.join("links")).unwrap(), "kept");

        file.save(&registry).await.unwrap();
        assert!(moved.join("links").exists());
        assert!(file.read().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let (audit, mut rx) = AuditLogger::channel("test", 10);
        let repo = FileLinkRepository::with_registry(
            RegistryFile::new(blocker.join("urls.json")),
            Registry::new(),
            audit,
        );

        let err = repo
            .create(CodeSource::Explicit("kept".to_string()), new_link(30))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage { .. }));
        assert!(repo.find_by_code("kept").await.unwrap().is_some());
        assert_eq!(rx.try_recv().unwrap().message, "write failed");

        let resolution = repo
            .record_click("kept", Utc::now(), Visit::default())
            .await
            .unwrap();
        assert!(matches!(resolution, Resolution::Found(_)));
        assert_eq!(
            repo.find_by_code("kept").await.unwrap().unwrap().click_count,
            1
        );
    }
}
