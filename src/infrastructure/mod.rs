//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`audit`] - Audit trail collaborator (queue, worker, sinks)
//! - [`persistence`] - JSON file backed registry repository

pub mod audit;
pub mod persistence;
