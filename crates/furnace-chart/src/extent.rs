//! Time extent of a reading collection and the minute axis spanning it.

use serde::Serialize;

use furnace_types::Reading;

/// Default spacing of the time axis: one minute.
pub const DEFAULT_STEP_MS: i64 = 60_000;

/// Earliest and latest bucket of a sorted collection, in unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeExtent {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeExtent {
    /// Span covered by the extent in milliseconds.
    pub fn span_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Extent of `readings`, which must already be sorted ascending.
///
/// Returns `None` for an empty collection. An endpoint whose bucket cannot be
/// parsed counts as epoch zero.
pub fn compute_time_extent(readings: &[Reading]) -> Option<TimeExtent> {
    let first = readings.first()?;
    let last = readings.last()?;
    Some(TimeExtent {
        start_ms: first.sort_key(),
        end_ms: last.sort_key(),
    })
}

/// Number of ticks on the axis from `start` to `end` inclusive, `step_ms` apart.
///
/// Zero under the same conditions that make [`build_time_axis`] empty.
/// Computed without building the axis and saturating at `usize::MAX`, so far
/// apart endpoints (an unparseable bucket counts as epoch zero) stay cheap.
pub fn time_axis_len(extent: Option<TimeExtent>, step_ms: i64) -> usize {
    let Some(extent) = extent else {
        return 0;
    };
    if extent.start_ms >= extent.end_ms || step_ms <= 0 {
        return 0;
    }

    let span = i128::from(extent.end_ms) - i128::from(extent.start_ms);
    let count = span / i128::from(step_ms) + 1;
    usize::try_from(count).unwrap_or(usize::MAX)
}

/// Timestamps from `start` to `end` inclusive, `step_ms` apart.
///
/// Empty when there is no extent, when it has no positive span, or when the
/// step is not positive. This materializes every tick; callers that only
/// need the count or a visible window use [`time_axis_len`].
pub fn build_time_axis(extent: Option<TimeExtent>, step_ms: i64) -> Vec<i64> {
    let len = time_axis_len(extent, step_ms);
    let Some(extent) = extent else {
        return Vec::new();
    };
    (0..len as i64)
        .map(|i| extent.start_ms + i * step_ms)
        .collect()
}
