//! Error types for furnace-store.

use std::path::PathBuf;

/// Result type for furnace-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by storage backends.
///
/// [`crate::ReadingStore`] never returns these to its callers; it logs them
/// and records a [`crate::StoreDiagnostic`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create the directory holding the readings file.
    #[error("Failed to create store directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A test backend was told to fail.
    #[error("Injected failure: {0}")]
    Injected(String),
}
