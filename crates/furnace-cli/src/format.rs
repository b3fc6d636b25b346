//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use furnace_chart::temperature_to_color;
use furnace_types::Reading;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            no_header: false,
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Serialize value to pretty JSON with a trailing newline.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }

    /// Temperature colored like its chart segment.
    #[must_use]
    pub fn format_temp(&self, celsius: i32) -> String {
        let text = format!("{} °C", celsius);
        if self.no_color {
            return text;
        }
        let color = temperature_to_color(celsius as f32);
        text.truecolor(color.r, color.g, color.b).bold().to_string()
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[must_use]
pub fn format_reading_text(reading: &Reading, opts: &FormatOptions) -> String {
    format!("{}  {}\n", reading.bucket, opts.format_temp(reading.temperature_celsius))
}

#[must_use]
pub fn format_history_text(history: &[Reading], opts: &FormatOptions) -> String {
    if history.is_empty() {
        return "No readings stored.\n".to_string();
    }

    let mut output = format!("History ({} readings):\n\n", history.len());
    output.push_str(&format!("{:<18}{}\n", "Hour", "Temperature"));
    for reading in history {
        output.push_str(&format!(
            "{:<18}{}\n",
            reading.bucket,
            opts.format_temp(reading.temperature_celsius)
        ));
    }
    output
}

pub fn format_history_json(history: &[Reading], opts: &FormatOptions) -> Result<String> {
    opts.as_json(&history)
}

#[must_use]
pub fn format_history_csv(history: &[Reading], opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "date,temperature_c\n".to_string()
    };
    for reading in history {
        output.push_str(&format!(
            "{},{}\n",
            csv_escape(&reading.bucket),
            reading.temperature_celsius
        ));
    }
    output
}
