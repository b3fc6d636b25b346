//! Chart projection for furnace temperature readings.
//!
//! Turns a sorted reading collection plus a [`Viewport`] into drawable
//! primitives: temperature and time grid lines, axis labels and a colored
//! polyline. All functions are pure; the only state is the viewport value,
//! which gestures replace as a whole.
//!
//! # Example
//!
//! ```
//! use furnace_chart::{ChartLayout, Gesture, Viewport, apply_gesture, project};
//! use furnace_types::Reading;
//!
//! let readings = vec![
//!     Reading { bucket: "01.01.2024 10:00".into(), temperature_celsius: 500 },
//!     Reading { bucket: "01.01.2024 11:00".into(), temperature_celsius: 900 },
//! ];
//!
//! let layout = ChartLayout::default();
//! let viewport = apply_gesture(Viewport::default(), Gesture::zoom(2.0), layout.canvas_width, 61, 60_000);
//! let frame = project(&readings, viewport, &layout);
//! assert_eq!(frame.segments.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod color;
pub mod extent;
pub mod labels;
pub mod projector;
pub mod render;
pub mod transform;
pub mod viewport;

pub use color::{Rgb, temperature_to_color};
pub use extent::{
    DEFAULT_STEP_MS, TimeExtent, build_time_axis, compute_time_extent, time_axis_len,
};
pub use labels::{LOW_ZOOM_THRESHOLD, format_time_label, time_axis_step_count};
pub use projector::{ChartLayout, ProjectionParams, build_polyline, cull_segments, project};
pub use render::{AxisLabel, ChartFrame, GridLine, Orientation, Segment};
pub use transform::{TemperatureScale, temperature_to_y, time_to_x, time_to_x_default_step};
pub use viewport::{
    Gesture, MAX_SCALE, MIN_SCALE, Viewport, apply_gesture, apply_gesture_default_step,
    max_offset_x,
};
