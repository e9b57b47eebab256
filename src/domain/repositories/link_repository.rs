//! Repository trait for short link data access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{LinkRecord, NewLink, ShortLink, Visit};
use crate::domain::resolver::Resolution;
use crate::error::AppError;
use crate::utils::code_generator::CodeSource;

/// Repository interface for the short code registry.
///
/// Every mutating method runs its check-and-write as one atomic step with
/// respect to other writers, and persists the registry before returning.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::FileLinkRepository`] - JSON file backed registry
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Claims a code from `source` and stores a new record under it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if an explicit code is malformed.
    /// Returns [`AppError::Conflict`] if an explicit code is already taken.
    /// Returns [`AppError::Storage`] if the registry could not be saved; the
    /// record stays in memory in that case.
    async fn create(&self, source: CodeSource, new_link: NewLink) -> Result<ShortLink, AppError>;

    /// Finds a record by its short code, regardless of expiry.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Lists every stored record with its code.
    async fn list(&self) -> Result<Vec<ShortLink>, AppError>;

    /// Counts stored records.
    async fn count(&self) -> Result<usize, AppError>;

    /// Resolves `code` at `now` and, only when it resolves to a live link,
    /// appends a click event built from `visit` and persists the registry.
    ///
    /// A failed save is logged but does not fail the call: the click is
    /// already part of the in-memory registry and will reach disk with the
    /// next successful save.
    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
        visit: Visit,
    ) -> Result<Resolution, AppError>;
}
