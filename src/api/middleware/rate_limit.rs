//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Sustained requests per minute allowed for one client.
pub const CLIENT_LOG_PER_MINUTE: u32 = 120;

/// Creates the rate limiter for the client log relay.
///
/// # Limits
///
/// - **Rate**: one token every 500 ms (120 per minute)
/// - **Burst**: 120 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Limits are applied per client IP address taken from the socket peer
/// address, so the router must be served with connect info.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/client-log", post(client_log_handler))
///     .layer(rate_limit::client_log_layer());
/// ```
pub fn client_log_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(60_000 / u64::from(CLIENT_LOG_PER_MINUTE))
            .burst_size(CLIENT_LOG_PER_MINUTE)
            .finish()
            .expect("non-zero rate limit quota"),
    );

    GovernorLayer::new(governor_conf)
}
