//! Read command implementation.

use anyhow::{Result, bail};
use furnace_core::TemperatureSource;
use furnace_store::ReadingStore;
use furnace_types::Reading;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::seed::seed_readings;
use crate::format::{FormatOptions, format_reading_text};

/// Result of one reading cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReadOutcome {
    /// A value was obtained and stored in its hour bucket.
    Stored {
        source: String,
        raw: f64,
        #[serde(flatten)]
        reading: Reading,
    },
    /// The source answered but had nothing to report.
    NoData { source: String },
}

/// Seed if needed, read once and upsert the rounded value at `now`.
///
/// A source error is returned unchanged; nothing is stored in that case.
pub async fn take_reading(
    store: &ReadingStore,
    source: &dyn TemperatureSource,
    now: OffsetDateTime,
) -> furnace_core::Result<ReadOutcome> {
    store.ensure_seeded(&seed_readings().unwrap_or_default());

    let name = source.name().to_string();
    let Some(raw) = source.read_temperature().await? else {
        debug!("{} reported no data", name);
        return Ok(ReadOutcome::NoData { source: name });
    };

    let celsius = raw.round() as i32;
    store.upsert(celsius, now);

    Ok(ReadOutcome::Stored {
        source: name,
        raw,
        reading: Reading::at(now, celsius),
    })
}

pub async fn cmd_read(
    store: &ReadingStore,
    source: &dyn TemperatureSource,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    let outcome = match take_reading(store, source, now).await {
        Ok(outcome) => outcome,
        Err(e) => bail!("Connection error: {}", e),
    };

    let content = match (&outcome, format) {
        (_, OutputFormat::Json) => opts.as_json(&outcome)?,
        (ReadOutcome::Stored { reading, .. }, _) => format_reading_text(reading, opts),
        (ReadOutcome::NoData { source }, _) => format!("No temperature data from {}\n", source),
    };

    crate::util::write_output(None, &content)
}
