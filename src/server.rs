//! HTTP server initialization and runtime setup.
//!
//! Handles registry loading, audit worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::audit::{AuditLogger, TracingAuditSink, run_audit_worker};
use crate::infrastructure::persistence::{FileLinkRepository, RegistryFile};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Audit queue and background worker
/// - Registry, loaded from the data file (an unreadable file starts empty)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (audit, audit_rx) =
        AuditLogger::channel(config.audit_origin.clone(), config.audit_queue_capacity);
    tokio::spawn(run_audit_worker(audit_rx, Arc::new(TracingAuditSink::new())));
    tracing::info!("Audit worker started");

    let repository = Arc::new(
        FileLinkRepository::open(RegistryFile::new(&config.data_file), audit.clone()).await,
    );

    let state = AppState::new(repository, audit.clone(), &config);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");
    audit.info(
        "startup",
        &format!("listening on {}", addr.port()),
        json!({}),
    );

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
