//! Handler relaying browser logs into the audit trail.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::client_log::{ClientLogRequest, ClientLogResponse};
use crate::infrastructure::audit::{AuditEntry, AuditLevel};
use crate::state::AppState;

/// Relays a client-side log entry to the audit logger.
///
/// # Endpoint
///
/// `POST /api/client-log`
///
/// # Request Body
///
/// ```json
/// {
///   "stack": "frontend",
///   "level": "error",
///   "pkg": "component",
///   "message": "render failed",
///   "extras": { "page": "stats" }
/// }
/// ```
///
/// Missing fields default to `frontend`, `info`, `client`, `""` and `{}`.
/// An unknown level is relayed as `info`. Any body, even an unparsable one,
/// is acknowledged with `{ "ok": true }`.
pub async fn client_log_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClientLogRequest>, JsonRejection>,
) -> Json<ClientLogResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            debug!("Client log body ignored: {}", e.body_text());
            ClientLogRequest::default()
        }
    };

    let level = request
        .level
        .as_deref()
        .and_then(|l| l.parse::<AuditLevel>().ok())
        .unwrap_or(AuditLevel::Info);

    state.audit.submit(AuditEntry {
        origin: request.stack.unwrap_or_else(|| "frontend".to_string()),
        level,
        category: request.pkg.unwrap_or_else(|| "client".to_string()),
        message: request.message.unwrap_or_default(),
        extras: request.extras.unwrap_or_else(|| json!({})),
    });

    Json(ClientLogResponse { ok: true })
}
