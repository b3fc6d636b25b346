//! History command implementation.

use anyhow::Result;
use furnace_store::ReadingStore;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_history_csv, format_history_json, format_history_text};
use crate::util::write_output;

/// Render the stored history in `format`.
pub fn render_history(store: &ReadingStore, format: OutputFormat, opts: &FormatOptions) -> Result<String> {
    let history = store.read_all();
    Ok(match format {
        OutputFormat::Json => format_history_json(&history, opts)?,
        OutputFormat::Text => format_history_text(&history, opts),
        OutputFormat::Csv => format_history_csv(&history, opts),
    })
}

pub fn cmd_history(store: &ReadingStore, format: OutputFormat, opts: &FormatOptions) -> Result<()> {
    let content = render_history(store, format, opts)?;
    write_output(None, &content)
}
