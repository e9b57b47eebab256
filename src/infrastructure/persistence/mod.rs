//! File-backed registry persistence.
//!
//! - [`RegistryFile`] - The JSON document: read, whole-file save, quarantine
//! - [`FileLinkRepository`] - In-memory registry behind a lock, saved after every mutation

pub mod file_link_repository;
pub mod registry_file;

pub use file_link_repository::{FileLinkRepository, load};
pub use registry_file::{RegistryFile, StorageError};
