//! Application layer services implementing business logic.
//!
//! Services consume the repository trait, apply link policy and report to
//! the audit trail. Handlers only translate HTTP to and from service calls.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and redirects
//! - [`services::stats_service::StatsService`] - Per-link statistics and listing

pub mod services;
