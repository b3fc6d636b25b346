//! Time axis label formatting and tick density.

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Zoom level below which the axis switches to day labels.
pub const LOW_ZOOM_THRESHOLD: f32 = 1.5;

/// Ticks skipped between labels when zoomed out: one day of minutes.
pub const COARSE_STEP_COUNT: usize = 1440;
/// Ticks skipped between labels when zoomed in: one hour of minutes.
pub const FINE_STEP_COUNT: usize = 60;

const DAY_LABEL: &[BorrowedFormatItem<'static>] = format_description!("[day].[month].[year]");
const HOUR_LABEL: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short] [hour]:[minute]");

/// Label for a tick at `timestamp_ms`.
///
/// Below `low_threshold` the label is the date (`dd.MM.yyyy`), otherwise the
/// weekday and time (`Mon 14:00`). Out-of-range timestamps yield an empty
/// label.
pub fn format_time_label(timestamp_ms: i64, scale: f32, low_threshold: f32) -> String {
    let nanos = i128::from(timestamp_ms) * 1_000_000;
    let Ok(at) = OffsetDateTime::from_unix_timestamp_nanos(nanos) else {
        return String::new();
    };

    let format = if scale < low_threshold {
        DAY_LABEL
    } else {
        HOUR_LABEL
    };
    at.format(format).unwrap_or_default()
}

/// How many axis ticks to advance between drawn labels.
pub fn time_axis_step_count(scale: f32, low_threshold: f32) -> usize {
    if scale < low_threshold {
        COARSE_STEP_COUNT
    } else {
        FINE_STEP_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Monday 01.01.2024 10:00 UTC
    const MONDAY_10: i64 = 1_704_103_200_000;

    #[test]
    fn test_coarse_label_is_date() {
        assert_eq!(format_time_label(MONDAY_10, 1.0, LOW_ZOOM_THRESHOLD), "01.01.2024");
    }

    #[test]
    fn test_fine_label_is_weekday_and_time() {
        assert_eq!(format_time_label(MONDAY_10, 1.5, LOW_ZOOM_THRESHOLD), "Mon 10:00");
        assert_eq!(format_time_label(MONDAY_10, 8.0, LOW_ZOOM_THRESHOLD), "Mon 10:00");
    }

    #[test]
    fn test_out_of_range_label_is_empty() {
        assert_eq!(format_time_label(i64::MAX, 1.0, LOW_ZOOM_THRESHOLD), "");
    }

    #[test]
    fn test_step_count() {
        assert_eq!(time_axis_step_count(0.5, LOW_ZOOM_THRESHOLD), 1440);
        assert_eq!(time_axis_step_count(1.49, LOW_ZOOM_THRESHOLD), 1440);
        assert_eq!(time_axis_step_count(1.5, LOW_ZOOM_THRESHOLD), 60);
        assert_eq!(time_axis_step_count(10.0, LOW_ZOOM_THRESHOLD), 60);
    }
}
