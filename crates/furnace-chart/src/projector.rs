//! Projection of a reading collection into a drawable chart frame.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use furnace_types::Reading;

use crate::color::temperature_to_color;
use crate::extent::{DEFAULT_STEP_MS, compute_time_extent, time_axis_len};
use crate::labels::{LOW_ZOOM_THRESHOLD, format_time_label, time_axis_step_count};
use crate::render::{AxisLabel, ChartFrame, GridLine, Orientation, Segment};
use crate::transform::{TemperatureScale, time_to_x};
use crate::viewport::Viewport;

/// Degrees between horizontal grid lines.
pub const TEMPERATURE_GRID_STEP: i32 = 250;

const LABEL_PADDING: f32 = 2.0;

/// Fixed geometry of the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Left margin reserved for temperature labels.
    pub time_axis_offset_px: f32,
    /// Width of one axis step at scale 1.
    pub base_step_width_px: f32,
    pub step_ms: i64,
    pub temperature: TemperatureScale,
    pub low_zoom_threshold: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 480.0,
            time_axis_offset_px: 48.0,
            base_step_width_px: 1.0,
            step_ms: DEFAULT_STEP_MS,
            temperature: TemperatureScale::default(),
            low_zoom_threshold: LOW_ZOOM_THRESHOLD,
        }
    }
}

impl ChartLayout {
    /// Layout with a custom canvas size and default everything else.
    pub fn with_size(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Self::default()
        }
    }
}

/// Layout plus the data origin and viewport: all a point mapping needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub layout: ChartLayout,
    pub start_ms: i64,
    pub viewport: Viewport,
}

impl ProjectionParams {
    pub fn new(layout: ChartLayout, start_ms: i64, viewport: Viewport) -> Self {
        Self {
            layout,
            start_ms,
            viewport,
        }
    }

    /// Pixel width of one axis step at the current zoom.
    pub fn time_scale_width(&self) -> f32 {
        self.layout.base_step_width_px * self.viewport.scale
    }

    /// Canvas x of a timestamp.
    pub fn x(&self, timestamp_ms: i64) -> f32 {
        time_to_x(
            timestamp_ms,
            self.start_ms,
            self.layout.time_axis_offset_px,
            self.time_scale_width(),
            self.viewport.offset_x,
            self.layout.step_ms,
        )
    }

    /// Indices of axis ticks whose x lands in `[time_axis_offset_px, canvas_width]`.
    ///
    /// Only every `every`-th tick counted from the start is included. `None`
    /// when no tick of an axis with `len` ticks is visible.
    pub fn visible_ticks(&self, len: usize, every: usize) -> Option<RangeInclusive<u64>> {
        let width = f64::from(self.time_scale_width());
        if len == 0 || !width.is_finite() || width <= 0.0 {
            return None;
        }

        let origin = f64::from(self.layout.time_axis_offset_px) + f64::from(self.viewport.offset_x);
        let lo = ((f64::from(self.layout.time_axis_offset_px) - origin) / width).ceil().max(0.0);
        let hi = ((f64::from(self.layout.canvas_width) - origin) / width).floor();
        if hi.is_nan() || hi < lo {
            return None;
        }

        let every = every.max(1) as u64;
        let first = (lo as u64).div_ceil(every).saturating_mul(every);
        let last = (hi as u64).min(len as u64 - 1);
        (first <= last).then_some(first..=last)
    }

    /// Canvas y of a temperature, clamped to the displayed range.
    pub fn y(&self, temperature: f32) -> f32 {
        let scale = &self.layout.temperature;
        scale.to_y(scale.clamp(temperature), self.layout.canvas_height) + self.viewport.offset_y
    }
}

/// One segment per consecutive pair of readings.
///
/// Pairs where either bucket cannot be parsed are skipped; the rest of the
/// line is still produced. No culling happens here.
pub fn build_polyline(readings: &[Reading], params: &ProjectionParams) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(readings.len().saturating_sub(1));

    for pair in readings.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let (Some(t1), Some(t2)) = (from.timestamp_ms(), to.timestamp_ms()) else {
            debug!("Skipping segment {} -> {}: unparseable bucket", from.bucket, to.bucket);
            continue;
        };

        let temp1 = from.temperature_celsius as f32;
        let temp2 = to.temperature_celsius as f32;
        segments.push(Segment {
            x1: params.x(t1),
            y1: params.y(temp1),
            x2: params.x(t2),
            y2: params.y(temp2),
            color: temperature_to_color(temp2),
        });
    }

    segments
}

/// Drop segments entirely outside `0..=width`.
pub fn cull_segments(segments: Vec<Segment>, width: f32) -> Vec<Segment> {
    segments
        .into_iter()
        .filter(|s| s.intersects_width(width))
        .collect()
}

/// Project sorted `readings` through `viewport` into a full chart frame.
pub fn project(readings: &[Reading], viewport: Viewport, layout: &ChartLayout) -> ChartFrame {
    let extent = compute_time_extent(readings);
    let params = ProjectionParams::new(*layout, extent.map_or(0, |e| e.start_ms), viewport);

    let mut grid = Vec::new();
    let mut labels = Vec::new();

    let scale = &layout.temperature;
    let (lo, hi) = (scale.min.ceil() as i32, scale.max.floor() as i32);
    let mut temp = lo;
    while temp <= hi {
        let y = params.y(temp as f32);
        grid.push(GridLine {
            orientation: Orientation::Horizontal,
            x1: layout.time_axis_offset_px,
            y1: y,
            x2: layout.canvas_width,
            y2: y,
        });
        labels.push(AxisLabel {
            x: LABEL_PADDING,
            y: y - LABEL_PADDING,
            text: format!("{temp}°C"),
        });
        temp += TEMPERATURE_GRID_STEP;
    }

    let axis_len = time_axis_len(extent, layout.step_ms);
    let every = time_axis_step_count(viewport.scale, layout.low_zoom_threshold);
    let ticks = params.visible_ticks(axis_len, every).into_iter().flatten();
    for index in ticks.step_by(every.max(1)) {
        let offset = i64::try_from(index)
            .unwrap_or(i64::MAX)
            .saturating_mul(layout.step_ms);
        let tick = params.start_ms.saturating_add(offset);
        let x = params.x(tick);
        if x < layout.time_axis_offset_px || x > layout.canvas_width {
            continue;
        }
        grid.push(GridLine {
            orientation: Orientation::Vertical,
            x1: x,
            y1: 0.0,
            x2: x,
            y2: layout.canvas_height,
        });
        labels.push(AxisLabel {
            x: x + LABEL_PADDING,
            y: layout.canvas_height - LABEL_PADDING,
            text: format_time_label(tick, viewport.scale, layout.low_zoom_threshold),
        });
    }

    let segments = cull_segments(build_polyline(readings, &params), layout.canvas_width);
    debug!(
        "Projected {} readings into {} segments, {} grid lines",
        readings.len(),
        segments.len(),
        grid.len()
    );

    ChartFrame {
        width: layout.canvas_width,
        height: layout.canvas_height,
        viewport,
        extent,
        grid,
        labels,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn reading(bucket: &str, temperature: i32) -> Reading {
        Reading {
            bucket: bucket.to_string(),
            temperature_celsius: temperature,
        }
    }

    fn params() -> ProjectionParams {
        let layout = ChartLayout {
            canvas_width: 200.0,
            canvas_height: 100.0,
            time_axis_offset_px: 10.0,
            base_step_width_px: 1.0,
            ..ChartLayout::default()
        };
        ProjectionParams::new(layout, 0, Viewport::default())
    }

    #[test]
    fn test_polyline_one_segment_per_pair() {
        let readings = [
            reading("01.01.1970 00:00", 0),
            reading("01.01.1970 01:00", 750),
            reading("01.01.1970 02:00", 1500),
        ];
        let segments = build_polyline(&readings, &params());

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].x1, 10.0);
        assert_eq!(segments[0].x2, 70.0);
        assert_eq!(segments[1].x2, 130.0);
        assert!((segments[0].y1 - 95.0).abs() < 1e-3);
        assert!((segments[1].y2 - 0.0).abs() < 1e-3);
        assert_eq!(segments[0].color, Rgb::ORANGE);
    }

    #[test]
    fn test_polyline_skips_only_broken_pairs() {
        let readings = [
            reading("01.01.1970 00:00", 100),
            reading("not a date", 200),
            reading("01.01.1970 02:00", 300),
            reading("01.01.1970 03:00", 400),
        ];
        let segments = build_polyline(&readings, &params());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].x1, 130.0);
    }

    #[test]
    fn test_polyline_needs_two_readings() {
        assert!(build_polyline(&[], &params()).is_empty());
        assert!(build_polyline(&[reading("01.01.1970 00:00", 1)], &params()).is_empty());
    }

    #[test]
    fn test_polyline_computes_offscreen_segments() {
        let readings: Vec<Reading> = (0..10)
            .map(|h| reading(&format!("01.01.1970 {h:02}:00"), 500))
            .collect();
        let all = build_polyline(&readings, &params());
        assert_eq!(all.len(), 9);

        let visible = cull_segments(all, 200.0);
        // x: 10, 70, 130, 190, 250 ...; the segment starting at 190 still crosses the edge
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn test_zoom_and_offsets_feed_mapping() {
        let mut p = params();
        p.viewport = Viewport {
            scale: 2.0,
            offset_x: -20.0,
            offset_y: 5.0,
        };
        assert_eq!(p.time_scale_width(), 2.0);
        assert_eq!(p.x(3_600_000), 10.0 + 120.0 - 20.0);
        assert!((p.y(1500.0) - 5.0).abs() < 1e-3);
        // clamped to the top of the range
        assert!((p.y(4000.0) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_project_empty_collection_has_grid_only() {
        let frame = project(&[], Viewport::default(), &ChartLayout::default());
        assert!(frame.is_empty());
        assert_eq!(frame.extent, None);
        // 0, 250, ..., 1500
        assert_eq!(frame.grid.len(), 7);
        assert!(
            frame
                .grid
                .iter()
                .all(|g| g.orientation == Orientation::Horizontal)
        );
        assert_eq!(frame.labels[0].text, "0°C");
        assert_eq!(frame.labels[6].text, "1500°C");
    }

    #[test]
    fn test_project_day_ticks_when_zoomed_out() {
        let readings: Vec<Reading> = (1..=3)
            .map(|d| reading(&format!("{d:02}.01.2024 00:00"), 600))
            .collect();
        let layout = ChartLayout::with_size(4000.0, 300.0);
        let frame = project(&readings, Viewport::default(), &layout);

        let vertical: Vec<&GridLine> = frame
            .grid
            .iter()
            .filter(|g| g.orientation == Orientation::Vertical)
            .collect();
        // one tick per day over 2 days inclusive
        assert_eq!(vertical.len(), 3);
        assert!(frame.labels.iter().any(|l| l.text == "02.01.2024"));
        assert_eq!(frame.segments.len(), 2);
    }

    #[test]
    fn test_project_hour_ticks_when_zoomed_in() {
        let readings = [
            reading("01.01.2024 10:00", 600),
            reading("01.01.2024 12:00", 700),
        ];
        let layout = ChartLayout::with_size(2000.0, 300.0);
        let viewport = Viewport {
            scale: 2.0,
            ..Viewport::default()
        };
        let frame = project(&readings, viewport, &layout);

        let texts: Vec<&str> = frame
            .labels
            .iter()
            .filter(|l| !l.text.ends_with("°C"))
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Mon 10:00", "Mon 11:00", "Mon 12:00"]);
    }

    #[test]
    fn test_project_corrupt_first_bucket() {
        let readings = [
            reading("corrupt", 400),
            reading("01.01.2024 10:00", 600),
            reading("01.01.2024 11:00", 700),
        ];
        let frame = project(&readings, Viewport::default(), &ChartLayout::default());

        assert_eq!(frame.extent.unwrap().start_ms, 0);
        // the valid pair sits ~28M px to the right of the epoch origin
        assert!(frame.segments.is_empty());
        let vertical = frame
            .grid
            .iter()
            .filter(|g| g.orientation == Orientation::Vertical)
            .count();
        // day ticks at 0 only within 800 px
        assert_eq!(vertical, 1);
        assert!(frame.labels.iter().any(|l| l.text == "01.01.1970"));
    }

    #[test]
    fn test_project_far_apart_buckets() {
        let readings = [
            reading("01.01.0001 00:00", 100),
            reading("01.01.2024 10:00", 600),
        ];
        let frame = project(&readings, Viewport::default(), &ChartLayout::default());
        assert!(frame.extent.is_some());
        assert_eq!(frame.segments.len(), 1);
        assert!(frame.labels.iter().any(|l| l.text == "01.01.0001"));

        let zoomed = Viewport {
            scale: 10.0,
            offset_x: -1.0e9,
            offset_y: 0.0,
        };
        let frame = project(&readings, zoomed, &ChartLayout::default());
        assert!(frame.labels.iter().all(|l| !l.text.is_empty()));
    }

    #[test]
    fn test_visible_ticks_window() {
        let p = params();
        // x = 10 + i, visible up to 200
        assert_eq!(p.visible_ticks(1000, 1), Some(0..=190));
        assert_eq!(p.visible_ticks(1000, 60), Some(0..=190));
        assert_eq!(p.visible_ticks(50, 1), Some(0..=49));
        assert_eq!(p.visible_ticks(0, 1), None);

        let mut panned = params();
        panned.viewport.offset_x = -100.0;
        // ticks 100..=290 are on screen, first multiple of 60 is 120
        assert_eq!(panned.visible_ticks(1000, 60), Some(120..=290));
        assert_eq!(panned.visible_ticks(100, 1), None);
    }

    #[test]
    fn test_frame_serializes() {
        let readings = [
            reading("01.01.2024 10:00", 600),
            reading("01.01.2024 11:00", 700),
        ];
        let frame = project(&readings, Viewport::default(), &ChartLayout::default());
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["segments"].as_array().unwrap().len(), 1);
        assert_eq!(json["viewport"]["scale"], 1.0);
    }
}
