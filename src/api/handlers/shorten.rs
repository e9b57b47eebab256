//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{CreateShortUrlRequest, CreateShortUrlResponse, Validity};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_meta::request_origin;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "example.com",    // scheme defaults to http://
///   "validity": 30,          // optional, minutes
///   "shortcode": "abc123"    // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:4000/abc123",
///   "expiry": "2025-01-01T12:30:00Z"
/// }
/// ```
///
/// The short link is built from `PUBLIC_BASE_URL` when configured, otherwise
/// from the request's own scheme and `Host`.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, missing or invalid URL,
/// non-positive or out-of-range validity, or a malformed/reserved shortcode.
/// Returns 409 Conflict if the shortcode is taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = payload
        .url
        .ok_or_else(|| AppError::bad_request("url is required", json!({ "field": "url" })))?;

    let validity = match payload.validity {
        Validity::Unset => None,
        Validity::Minutes(minutes) => Some(minutes),
        Validity::OutOfRange => {
            return Err(AppError::bad_request(
                "Validity is out of range",
                json!({ "field": "validity" }),
            ));
        }
    };

    let base = match &state.public_base_url {
        Some(base) => base.clone(),
        None => request_origin(&headers, state.behind_proxy)?,
    };

    let link = state
        .link_service
        .create_short_link(&url, validity, payload.shortcode)
        .await?;

    let response = CreateShortUrlResponse {
        short_link: state.link_service.short_url(&base, &link.code),
        expiry: link.record.expires_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
