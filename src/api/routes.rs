//! API route configuration.

use crate::api::handlers::{
    client_log_handler, redirect_handler, shorten_handler, stats_handler, stats_list_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short link management routes.
///
/// # Endpoints
///
/// - `POST /shorturls`         - Create a short link
/// - `GET  /shorturls`         - List every link with its clicks
/// - `GET  /shorturls/{code}`  - Statistics for one link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", post(shorten_handler).get(stats_list_handler))
        .route("/shorturls/{code}", get(stats_handler))
}

/// Auxiliary routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /client-log` - Relay a browser log entry (rate limited per IP)
pub fn auxiliary_routes() -> Router<AppState> {
    Router::new()
        .route("/client-log", post(client_log_handler))
        .layer(rate_limit::client_log_layer())
}

/// The catch-all redirect route. Must be merged after every fixed route.
pub fn redirect_routes() -> Router<AppState> {
    Router::new().route("/{code}", get(redirect_handler))
}
