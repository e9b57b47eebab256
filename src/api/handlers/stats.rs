//! Handlers for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkDetails;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves a short link with its click history.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// # Response
///
/// ```json
/// {
///   "shortcode": "abc123",
///   "url": "http://example.com",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "expiresAt": "2025-01-01T12:30:00Z",
///   "clicks": 1,
///   "events": [
///     {
///       "ts": "2025-01-01T12:01:00Z",
///       "referrer": "direct",
///       "ip": "203.0.113.7",
///       "location": { "label": "203.0.x.x" }
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkDetails>, AppError> {
    let record = state.stats_service.get_link_stats(&code).await?;

    Ok(Json(LinkDetails::new(code, record)))
}

/// Lists every stored link, expired ones included.
///
/// # Endpoint
///
/// `GET /shorturls`
///
/// # Response
///
/// A JSON array of the objects returned by [`stats_handler`], ordered by code.
pub async fn stats_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkDetails>>, AppError> {
    let links = state.stats_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkDetails::from).collect()))
}
