//! Core types for furnace temperature readings.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, ParseResult};

/// Text layout of a bucket on disk: `dd.MM.yyyy HH:mm`.
pub const BUCKET_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day].[month].[year] [hour]:[minute]");

/// Truncate a timestamp to the start of its hour.
///
/// Minutes, seconds and sub-second parts are zeroed. The wall-clock fields of
/// `now` are kept as-is, so the offset is dropped rather than converted.
///
/// # Examples
///
/// ```
/// use furnace_types::truncate_to_hour;
/// use time::macros::{datetime, offset};
///
/// let now = datetime!(2024-01-01 10:30:15.5).assume_offset(offset!(+3));
/// assert_eq!(truncate_to_hour(now), datetime!(2024-01-01 10:00));
/// ```
#[must_use]
pub fn truncate_to_hour(now: OffsetDateTime) -> PrimitiveDateTime {
    let local = PrimitiveDateTime::new(now.date(), now.time());
    let time = now.time();
    let past_hour = Duration::new(
        i64::from(time.minute()) * 60 + i64::from(time.second()),
        // always below 1e9
        time.nanosecond() as i32,
    );
    local - past_hour
}

/// Render a bucket through [`BUCKET_FORMAT`], the layout [`parse_bucket`] reads.
///
/// Formatting a `PrimitiveDateTime` with these components cannot fail; should
/// it ever, the ISO form from `Display` is returned, which `parse_bucket`
/// rejects and readers treat as a corrupt date.
#[must_use]
pub fn format_bucket(bucket: PrimitiveDateTime) -> String {
    bucket
        .format(BUCKET_FORMAT)
        .unwrap_or_else(|_| bucket.to_string())
}

/// Parse a bucket written as `dd.MM.yyyy HH:mm`.
pub fn parse_bucket(value: &str) -> ParseResult<PrimitiveDateTime> {
    PrimitiveDateTime::parse(value.trim(), BUCKET_FORMAT).map_err(|e| ParseError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// One hourly furnace temperature reading.
///
/// The bucket is kept as text so that a single corrupt date in the persisted
/// file does not prevent the rest of the collection from loading. Use
/// [`Reading::bucket_time`] or [`Reading::timestamp_ms`] to interpret it.
///
/// Serialized as `{"date": "dd.MM.yyyy HH:mm", "temperature": <int>}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Hour bucket, the dedup key.
    #[cfg_attr(feature = "serde", serde(rename = "date"))]
    pub bucket: String,
    /// Temperature in degrees Celsius. Not validated here.
    #[cfg_attr(feature = "serde", serde(rename = "temperature"))]
    pub temperature_celsius: i32,
}

impl Reading {
    /// Create a reading for an already truncated bucket.
    #[must_use]
    pub fn new(bucket: PrimitiveDateTime, temperature_celsius: i32) -> Self {
        Self {
            bucket: format_bucket(bucket),
            temperature_celsius,
        }
    }

    /// Create a reading for the hour containing `now`.
    #[must_use]
    pub fn at(now: OffsetDateTime, temperature_celsius: i32) -> Self {
        Self::new(truncate_to_hour(now), temperature_celsius)
    }

    /// Parse the bucket text.
    pub fn bucket_time(&self) -> ParseResult<PrimitiveDateTime> {
        parse_bucket(&self.bucket)
    }

    /// Bucket as unix milliseconds, interpreting the date-time as UTC.
    ///
    /// Returns `None` when the bucket text cannot be parsed.
    #[must_use]
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.bucket_time()
            .ok()
            .map(|dt| dt.assume_utc().unix_timestamp() * 1000)
    }

    /// Ordering key: the bucket in milliseconds, with unparseable buckets at epoch zero.
    #[must_use]
    pub fn sort_key(&self) -> i64 {
        self.timestamp_ms().unwrap_or(0)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {} °C", self.bucket, self.temperature_celsius)
    }
}

/// Sort readings by bucket ascending.
///
/// The sort is stable; unparseable buckets sort as epoch zero.
pub fn sort_by_bucket(readings: &mut [Reading]) {
    readings.sort_by_key(Reading::sort_key);
}
