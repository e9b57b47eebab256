//! DTOs for the client log relay endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A log entry submitted by a browser client.
///
/// Every field is optional; see
/// [`crate::api::handlers::client_log::client_log_handler`] for defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ClientLogRequest {
    pub stack: Option<String>,
    pub level: Option<String>,
    pub pkg: Option<String>,
    pub message: Option<String>,
    pub extras: Option<Value>,
}

/// Acknowledgement returned for every relayed entry.
#[derive(Debug, Serialize)]
pub struct ClientLogResponse {
    pub ok: bool,
}
