//! # Media Error Types

use thiserror::Error;

/// Errors from media analysis and analyzer selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Zero-length payload; nothing to analyze.
    #[error("cannot analyze empty payload for {filename:?}")]
    EmptyPayload {
        /// Name the payload was submitted under.
        filename: String,
    },

    /// Analyzer name did not match a known implementation.
    #[error("unknown media analyzer {0:?}: expected \"current\" or \"legacy\"")]
    UnknownAnalyzer(String),
}
