//! # Error Types
//!
//! Errors raised while parsing content-hash identifiers. Uses `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A string could not be interpreted as a [`ContentHash`](crate::ContentHash).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// Wrong number of hex characters.
    #[error("content hash must be {expected} hex chars, got {actual} chars")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },

    /// Input contained a non-hex character.
    #[error("content hash contains non-hex character {0:?}")]
    NonHex(char),
}
