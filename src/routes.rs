//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturls`         - Create a short link
//! - `GET  /shorturls`         - List all links
//! - `GET  /shorturls/{code}`  - Link statistics
//! - `GET  /health`            - Health check: registry, audit queue
//! - `POST /api/client-log`    - Browser log relay (rate limited)
//! - `GET  /{code}`            - Short link redirect
//! - anything else             - JSON 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the log relay
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::tracing;
use crate::api::routes::{auxiliary_routes, link_routes, redirect_routes};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with state applied, without path normalization.
///
/// Fixed routes take precedence over the `/{code}` capture, so reserved
/// words such as `health` never reach the redirect handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(link_routes())
        .route("/health", get(health_handler))
        .nest("/api", auxiliary_routes())
        .merge(redirect_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`: the redirect handler
/// and the rate limiter read the peer address.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
