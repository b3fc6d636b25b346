//! Standalone SVG rendering of a projected chart frame.

use std::fmt::Write;

use furnace_chart::{ChartFrame, Orientation};

const GRID_COLOR: &str = "#d0d0d0";
const LABEL_COLOR: &str = "#404040";
const FONT_SIZE: u32 = 11;

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Draw `frame` as an SVG document: grid first, then labels, then the polyline.
pub fn render_svg(frame: &ChartFrame) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height
    );
    let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#);

    let _ = writeln!(svg, r#"  <g class="grid" stroke="{GRID_COLOR}" stroke-width="1">"#);
    for line in &frame.grid {
        let dash = match line.orientation {
            Orientation::Horizontal => "",
            Orientation::Vertical => r#" stroke-dasharray="2,3""#,
        };
        let _ = writeln!(
            svg,
            r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"{}/>"#,
            line.x1, line.y1, line.x2, line.y2, dash
        );
    }
    svg.push_str("  </g>\n");

    let _ = writeln!(
        svg,
        r#"  <g class="labels" fill="{LABEL_COLOR}" font-family="sans-serif" font-size="{FONT_SIZE}">"#
    );
    for label in &frame.labels {
        let _ = writeln!(
            svg,
            r#"    <text x="{:.1}" y="{:.1}">{}</text>"#,
            label.x,
            label.y,
            escape_text(&label.text)
        );
    }
    svg.push_str("  </g>\n");

    let _ = writeln!(
        svg,
        r#"  <g class="series" stroke-width="2" stroke-linecap="round">"#
    );
    for segment in &frame.segments {
        let _ = writeln!(
            svg,
            r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}"/>"#,
            segment.x1,
            segment.y1,
            segment.x2,
            segment.y2,
            segment.color.to_hex()
        );
    }
    svg.push_str("  </g>\n");

    svg.push_str("</svg>\n");
    svg
}
