//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_normalizer`] - Default scheme and absolute-URL validation
//! - [`ip_bucket`] - Coarse location labels from client IPs
//! - [`request_meta`] - Origin, client IP and referrer from HTTP headers

pub mod code_generator;
pub mod ip_bucket;
pub mod request_meta;
pub mod url_normalizer;
