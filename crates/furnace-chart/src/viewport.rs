//! Chart viewport and gesture handling.

use serde::Serialize;

use crate::extent::DEFAULT_STEP_MS;

/// Smallest allowed zoom.
pub const MIN_SCALE: f32 = 0.5;
/// Largest allowed zoom.
pub const MAX_SCALE: f32 = 10.0;

/// Visible window of the chart.
///
/// A viewport is a plain value: gestures produce a new one through
/// [`apply_gesture`] instead of mutating fields piecemeal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Zoom factor, within [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub scale: f32,
    /// Horizontal pan in pixels, never positive.
    pub offset_x: f32,
    /// Vertical pan in pixels, unclamped.
    pub offset_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// One pan/zoom event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub dx: f32,
    pub dy: f32,
    pub zoom: f32,
}

impl Gesture {
    /// A pure pan.
    pub fn pan(dx: f32, dy: f32) -> Self {
        Self { dx, dy, zoom: 1.0 }
    }

    /// A pure zoom.
    pub fn zoom(factor: f32) -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            zoom: factor,
        }
    }
}

/// Bounds the pan so the window never scrolls past the data.
///
/// `(axis_len / scale) * (step_ms / 1000) - viewport_width`, floored at zero.
pub fn max_offset_x(time_axis_len: usize, scale: f32, viewport_width: f32, step_ms: i64) -> f32 {
    let step_secs = step_ms as f32 / 1000.0;
    let max = (time_axis_len as f32 / scale) * step_secs - viewport_width;
    if max.is_finite() { max.max(0.0) } else { 0.0 }
}

/// Apply a pan/zoom gesture and return the replacement viewport.
///
/// The zoom is applied first so the pan limit uses the new scale. A zoom
/// product that is not a number leaves the scale unchanged; infinities clamp.
pub fn apply_gesture(
    viewport: Viewport,
    gesture: Gesture,
    viewport_width: f32,
    time_axis_len: usize,
    step_ms: i64,
) -> Viewport {
    let zoomed = viewport.scale * gesture.zoom;
    let scale = if zoomed.is_nan() {
        viewport.scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        zoomed.clamp(MIN_SCALE, MAX_SCALE)
    };

    let limit = max_offset_x(time_axis_len, scale, viewport_width, step_ms);
    let panned = viewport.offset_x + gesture.dx;
    let offset_x = if panned.is_nan() {
        viewport.offset_x.clamp(-limit, 0.0)
    } else {
        panned.clamp(-limit, 0.0)
    };

    let offset_y = if gesture.dy.is_finite() {
        viewport.offset_y + gesture.dy
    } else {
        viewport.offset_y
    };

    Viewport {
        scale,
        offset_x,
        offset_y,
    }
}

/// [`apply_gesture`] with the default one-minute axis step.
pub fn apply_gesture_default_step(
    viewport: Viewport,
    gesture: Gesture,
    viewport_width: f32,
    time_axis_len: usize,
) -> Viewport {
    apply_gesture(
        viewport,
        gesture,
        viewport_width,
        time_axis_len,
        DEFAULT_STEP_MS,
    )
}
