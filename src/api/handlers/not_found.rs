//! Fallback for unmatched routes.

use crate::error::AppError;
use serde_json::json;

/// Answers every request no route claimed.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("not found", json!({}))
}
