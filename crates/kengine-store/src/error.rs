//! # Asset Store Error Types
//!
//! Structured errors for the raising operations of `kengine-store`
//! (`save_*`, `read_file`, `copy_asset`, `verify_asset`). Read-only
//! informational operations never return these.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from asset store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {}", .path.display(), .source)]
    Io {
        /// The path the failing operation touched.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stored name is not a single plain path component.
    #[error("invalid asset name {0:?}: must be a plain file name inside the store")]
    InvalidName(String),
}

impl StoreError {
    /// Whether the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
