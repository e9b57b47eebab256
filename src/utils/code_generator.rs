//! Short code generation and validation utilities.
//!
//! A [`CodeSource`] is either a caller-supplied code, which must be well
//! formed and free, or a request for a random one, which is regenerated until
//! it does not collide.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde_json::json;

use crate::error::AppError;

/// Alphanumerics without the look-alikes `0 O o 1 l I`.
pub const ALPHABET: &[u8] = b"23456789abcdefghijkmnpqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 30;

static CODE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,30}$").expect("valid code regex"));

/// Reserved codes that cannot be used as short links.
///
/// These collide with fixed routes of the service.
const RESERVED_CODES: &[&str] = &["shorturls", "health", "api"];

/// Where the short code for a new link comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSource {
    /// Use exactly this code.
    Explicit(String),
    /// Generate a random code of the given length.
    Random { length: usize },
}

impl CodeSource {
    /// Picks the source from an optional caller-supplied code.
    ///
    /// A code that is blank after trimming counts as absent.
    pub fn from_request(custom_code: Option<String>, random_length: usize) -> Self {
        match custom_code.map(|c| c.trim().to_string()) {
            Some(code) if !code.is_empty() => CodeSource::Explicit(code),
            _ => CodeSource::Random {
                length: random_length,
            },
        }
    }

    /// Produces a code that `is_taken` reports as free.
    ///
    /// Must be called while the caller holds exclusive access to whatever
    /// `is_taken` inspects, otherwise the answer may be stale by insertion time.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if an explicit code is malformed or reserved
    /// - [`AppError::Conflict`] if an explicit code is already taken
    pub fn claim(&self, is_taken: impl Fn(&str) -> bool) -> Result<String, AppError> {
        match self {
            CodeSource::Explicit(code) => {
                validate_custom_code(code)?;
                if is_taken(code) {
                    return Err(AppError::conflict(
                        "Short code already exists",
                        json!({ "code": code }),
                    ));
                }
                Ok(code.clone())
            }
            CodeSource::Random { length } => loop {
                let code = generate_code(*length);
                if !is_taken(&code) && !RESERVED_CODES.contains(&code.as_str()) {
                    break Ok(code);
                }
            },
        }
    }
}

/// Generates a random code of `length` characters drawn from [`ALPHABET`].
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-30 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CODE_FORMAT.is_match(code) {
        return Err(AppError::bad_request(
            "Short code must be 3-30 characters of letters, digits, '-' or '_'",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
