//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`resolver`] - Expiry-aware code resolution
//! - [`repositories`] - Data access trait definitions
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`repositories::LinkRepository::record_click`] takes the registry write lock
//! 3. [`resolver::resolve`] decides `Found` / `Expired` / `NotFound`
//! 4. On `Found` the record gains a [`entities::ClickEvent`] and the registry is saved

pub mod entities;
pub mod repositories;
pub mod resolver;
