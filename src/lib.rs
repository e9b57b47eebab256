//! # Short URLs
//!
//! A small URL shortening service with expiring links and click analytics,
//! built with Axum and backed by a single JSON file.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link and click entities, expiry resolution, repository trait
//! - **Application Layer** ([`application`]) - Link creation, redirects and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - Registry file and audit trail
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or caller-chosen short codes with atomic collision checks
//! - Per-link expiry; expired links answer `410 Gone`
//! - Click history with referrer and a coarse, privacy-reduced location
//! - Audit trail delivered off the request path with retries
//!
//! ## Quick Start
//!
//! ```bash
//! export DATA_FILE="data/urls.json"   # Optional
//! cargo run
//!
//! curl -X POST localhost:4000/shorturls \
//!   -H 'content-type: application/json' \
//!   -d '{"url": "example.com", "validity": 10}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkPolicy, LinkService, StatsService};
    pub use crate::domain::entities::{ClickEvent, LinkRecord, NewLink, Registry, ShortLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
