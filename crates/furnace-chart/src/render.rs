//! Drawable primitives produced by the projector.
//!
//! These types are backend-agnostic: a caller walks a [`ChartFrame`] and draws
//! each primitive with whatever canvas it has.

use serde::Serialize;

use crate::color::Rgb;
use crate::extent::TimeExtent;
use crate::viewport::Viewport;

/// One straight piece of the temperature polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Rgb,
}

impl Segment {
    /// Whether any part of the segment falls within `0..=width` horizontally.
    pub fn intersects_width(&self, width: f32) -> bool {
        let left = self.x1.min(self.x2);
        let right = self.x1.max(self.x2);
        right >= 0.0 && left <= width
    }
}

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant temperature.
    Horizontal,
    /// Constant time.
    Vertical,
}

/// A background grid line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub orientation: Orientation,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A text label anchored at its bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Everything needed to draw one chart frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f32,
    pub height: f32,
    pub viewport: Viewport,
    pub extent: Option<TimeExtent>,
    pub grid: Vec<GridLine>,
    pub labels: Vec<AxisLabel>,
    pub segments: Vec<Segment>,
}

impl ChartFrame {
    /// Whether the frame has no data to draw.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
