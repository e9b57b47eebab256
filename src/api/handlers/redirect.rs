//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::handlers::not_found::not_found_handler;
use crate::domain::entities::Visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_meta::{client_ip, referrer};

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code against the registry
/// 2. Record the click (timestamp, referrer, source IP, coarse location)
/// 3. Return `302 Found` with the target in `Location`
///
/// Resolution and recording happen under one registry write, so expired
/// links never gain clicks and concurrent clicks are all counted.
///
/// # Errors
///
/// Returns 410 Gone if the link has expired.
/// Returns 500 if the stored target cannot be sent as a `Location`.
/// Unknown codes get the same 404 as any unmatched route.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let visit = Visit::new(
        client_ip(&headers, addr, state.behind_proxy),
        referrer(&headers),
    );

    match state.link_service.follow(&code, visit).await {
        Ok(url) => Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response()),
        Err(AppError::NotFound { .. }) => Ok(not_found_handler().await.into_response()),
        Err(e) => Err(e),
    }
}
