//! Mapping between data space (timestamps, degrees) and canvas pixels.

use serde::Serialize;

use crate::extent::DEFAULT_STEP_MS;

/// Lowest temperature shown on the chart.
pub const MIN_TEMPERATURE: f32 = 0.0;
/// Highest temperature shown on the chart.
pub const MAX_TEMPERATURE: f32 = 1500.0;
/// Share of the canvas height used by the temperature range.
pub const DEFAULT_HEIGHT_FACTOR: f32 = 0.95;

/// Vertical temperature scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureScale {
    pub min: f32,
    pub max: f32,
    pub height_factor: f32,
}

impl Default for TemperatureScale {
    fn default() -> Self {
        Self {
            min: MIN_TEMPERATURE,
            max: MAX_TEMPERATURE,
            height_factor: DEFAULT_HEIGHT_FACTOR,
        }
    }
}

impl TemperatureScale {
    /// Canvas y of `temp`. Higher temperatures sit closer to the top.
    pub fn to_y(&self, temp: f32, canvas_height: f32) -> f32 {
        (self.max - temp) * (canvas_height * self.height_factor) / (self.max - self.min)
    }

    /// Clamp `temp` into the displayed range.
    pub fn clamp(&self, temp: f32) -> f32 {
        temp.clamp(self.min.min(self.max), self.max.max(self.min))
    }
}

/// Canvas y of `temp` on the default 0..=1500 °C scale.
pub fn temperature_to_y(temp: f32, canvas_height: f32) -> f32 {
    TemperatureScale::default().to_y(temp, canvas_height)
}

/// Canvas x of `timestamp_ms`.
///
/// `((timestamp - start) / step) * time_scale_width + axis_offset + viewport_offset_x`
pub fn time_to_x(
    timestamp_ms: i64,
    start_ms: i64,
    time_axis_offset_px: f32,
    time_scale_width: f32,
    viewport_offset_x: f32,
    step_ms: i64,
) -> f32 {
    let steps = timestamp_ms.saturating_sub(start_ms) as f64 / step_ms as f64;
    (steps * f64::from(time_scale_width)) as f32 + time_axis_offset_px + viewport_offset_x
}

/// [`time_to_x`] with the default one-minute step.
pub fn time_to_x_default_step(
    timestamp_ms: i64,
    start_ms: i64,
    time_axis_offset_px: f32,
    time_scale_width: f32,
    viewport_offset_x: f32,
) -> f32 {
    time_to_x(
        timestamp_ms,
        start_ms,
        time_axis_offset_px,
        time_scale_width,
        viewport_offset_x,
        DEFAULT_STEP_MS,
    )
}
