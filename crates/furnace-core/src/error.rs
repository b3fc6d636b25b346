//! Error types for furnace-core.
//!
//! Every variant is a "connection error" from the user's point of view: the
//! caller shows it inline and does not retry.

use thiserror::Error;

/// Errors raised while obtaining a temperature.
#[derive(Debug, Error)]
pub enum Error {
    /// The sensor host could not be reached (DNS, refused, timeout).
    #[error("Sensor not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The sensor answered with a non-success status.
    #[error("Sensor returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The body was not `{"temperature": <number>}`.
    #[error("Invalid sensor response: {0}")]
    InvalidResponse(String),

    /// The configured base URL is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client construction or transfer error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failure injected into a simulated sensor.
    #[error("Simulated sensor failure: {0}")]
    Simulated(String),
}

/// Result type for furnace-core operations.
pub type Result<T> = std::result::Result<T, Error>;
