//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::config::Config;
use crate::infrastructure::audit::AuditLogger;
use crate::infrastructure::persistence::FileLinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<FileLinkRepository>>,
    pub stats_service: Arc<StatsService<FileLinkRepository>>,
    pub audit: AuditLogger,
    /// Fixed origin for returned short links; `None` derives it per request.
    pub public_base_url: Option<String>,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires both services to one repository.
    pub fn new(repository: Arc<FileLinkRepository>, audit: AuditLogger, config: &Config) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                repository.clone(),
                audit.clone(),
                config.link_policy(),
            )),
            stats_service: Arc::new(StatsService::new(repository)),
            audit,
            public_base_url: config.public_base_url.clone(),
            behind_proxy: config.behind_proxy,
        }
    }
}
