#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use shorturls::config::Config;
use shorturls::domain::entities::{LinkRecord, Registry};
use shorturls::infrastructure::audit::{AuditEntry, AuditLogger};
use shorturls::infrastructure::persistence::{FileLinkRepository, RegistryFile};
use shorturls::routes::router;
use shorturls::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::Layer;

pub const TEST_HOST: &str = "localhost:4000";

/// Registry plus its backing directory; the directory lives as long as this.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
    pub audit_rx: mpsc::Receiver<AuditEntry>,
}

impl TestContext {
    pub fn data_file(&self) -> RegistryFile {
        RegistryFile::new(self.dir.path().join("urls.json"))
    }

    pub fn server(&self) -> TestServer {
        test_server(self.state.clone())
    }
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(Registry::new())
}

pub fn create_test_state_with(registry: Registry) -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let (audit, audit_rx) = AuditLogger::channel("backend", 100);

    let repository = Arc::new(FileLinkRepository::with_registry(
        RegistryFile::new(dir.path().join("urls.json")),
        registry,
        audit.clone(),
    ));

    let state = AppState::new(repository, audit, &Config::default());

    TestContext {
        dir,
        state,
        audit_rx,
    }
}

/// Registry holding one live and one expired link.
pub fn seeded_registry() -> Registry {
    let now = Utc::now();
    let mut registry = Registry::new();
    registry.insert_new(
        "live01".to_string(),
        LinkRecord::new(
            "http://example.com/live".to_string(),
            now,
            now + Duration::minutes(30),
        ),
    );
    registry.insert_new(
        "gone01".to_string(),
        LinkRecord::new(
            "http://example.com/gone".to_string(),
            now - Duration::minutes(10),
            now - Duration::minutes(1),
        ),
    );
    registry
}

pub fn test_server(state: AppState) -> TestServer {
    let app = router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

pub fn drain(rx: &mut mpsc::Receiver<AuditEntry>) -> Vec<AuditEntry> {
    let mut entries = Vec::new();
    while let Ok(entry) = rx.try_recv() {
        entries.push(entry);
    }
    entries
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
