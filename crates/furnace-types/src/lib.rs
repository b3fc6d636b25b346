//! Shared types for the furnace temperature monitor.
//!
//! This crate holds the [`Reading`] record persisted by `furnace-store` and
//! drawn by `furnace-chart`, together with the hour-bucket helpers that
//! define its dedup key.
//!
//! # Example
//!
//! ```
//! use furnace_types::Reading;
//! use time::macros::datetime;
//!
//! let reading = Reading::at(datetime!(2024-01-01 10:30 UTC), 600);
//! assert_eq!(reading.bucket, "01.01.2024 10:00");
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    BUCKET_FORMAT, Reading, format_bucket, parse_bucket, sort_by_bucket, truncate_to_hour,
};
