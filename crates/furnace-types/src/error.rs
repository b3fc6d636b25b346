//! Error types for data parsing in furnace-types.

use thiserror::Error;

/// Errors that can occur when decoding reading data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The bucket text does not match `dd.MM.yyyy HH:mm`.
    #[error("Invalid bucket date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}

/// Result type alias using furnace-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
