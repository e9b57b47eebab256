//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod client_log;
pub mod health;
pub mod not_found;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use client_log::client_log_handler;
pub use health::health_handler;
pub use not_found::not_found_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::{stats_handler, stats_list_handler};
