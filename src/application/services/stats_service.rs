//! Per-link statistics service.

use std::sync::Arc;

use crate::domain::entities::{LinkRecord, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Read-only view over stored links and their click history.
pub struct StatsService<R: LinkRepository> {
    repository: Arc<R>,
}

impl<R: LinkRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the full record stored under `code`.
    ///
    /// Expired links are still reported; expiry only affects redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link_stats(&self, code: &str) -> Result<LinkRecord, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Returns every stored link ordered by code.
    pub async fn list_links(&self) -> Result<Vec<ShortLink>, AppError> {
        self.repository.list().await
    }

    /// Counts the stored links.
    pub async fn count_links(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}
