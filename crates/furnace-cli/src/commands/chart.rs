//! Chart command implementation.

use std::path::PathBuf;

use anyhow::Result;
use furnace_chart::{
    ChartFrame, ChartLayout, Gesture, Viewport, apply_gesture, compute_time_extent, project,
    time_axis_len,
};
use furnace_store::ReadingStore;
use tracing::debug;

use crate::cli::ChartFormat;
use crate::format::FormatOptions;
use crate::svg::render_svg;
use crate::util::write_output;

/// Arguments for the chart command.
pub struct ChartArgs<'a> {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub format: ChartFormat,
    pub output: Option<&'a PathBuf>,
}

/// Apply the requested zoom and pan to a fresh viewport and project the store.
pub fn build_frame(store: &ReadingStore, args: &ChartArgs<'_>) -> ChartFrame {
    let readings = store.read_all();
    let layout = ChartLayout::with_size(args.width, args.height);

    let axis_len = time_axis_len(compute_time_extent(&readings), layout.step_ms);
    let gesture = Gesture {
        dx: args.pan_x,
        dy: args.pan_y,
        zoom: args.scale,
    };
    let viewport = apply_gesture(
        Viewport::default(),
        gesture,
        layout.canvas_width,
        axis_len,
        layout.step_ms,
    );
    debug!("Chart viewport {:?} over {} axis steps", viewport, axis_len);

    project(&readings, viewport, &layout)
}

pub fn cmd_chart(store: &ReadingStore, args: ChartArgs<'_>, opts: &FormatOptions) -> Result<()> {
    let frame = build_frame(store, &args);
    let content = match args.format {
        ChartFormat::Json => opts.as_json(&frame)?,
        ChartFormat::Svg => render_svg(&frame),
    };
    write_output(args.output, &content)
}
