//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. They derive serde because the
//! registry is persisted as a single JSON document.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - Target URL, validity window and click analytics
//! - [`ClickEvent`] - A single successful redirect
//! - [`Registry`] - Code → record map, the unit of persistence
//!
//! `NewLink` carries creation input; `ShortLink` pairs a record with its code
//! for listings.

pub mod click;
pub mod link;
pub mod registry;

pub use click::{ClickEvent, DIRECT_REFERRER, Location, Visit};
pub use link::{LinkRecord, NewLink, ShortLink};
pub use registry::Registry;
