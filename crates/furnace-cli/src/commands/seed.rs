//! Seed command implementation.

use anyhow::{Context, Result};
use furnace_store::ReadingStore;
use furnace_types::Reading;

/// Sample readings bundled with the binary.
const SEED_JSON: &str = include_str!("../../assets/seed.json");

/// Parse the bundled sample readings.
pub fn seed_readings() -> Result<Vec<Reading>> {
    serde_json::from_str(SEED_JSON).context("Bundled seed data is invalid")
}

pub fn cmd_seed(store: &ReadingStore, force: bool, quiet: bool) -> Result<()> {
    let seed = seed_readings()?;

    if store.is_initialized() && !force {
        if !quiet {
            eprintln!("Readings file already exists; use --force to overwrite it.");
        }
        return Ok(());
    }

    if force {
        store.replace_all(&seed);
    } else {
        store.ensure_seeded(&seed);
    }

    if !quiet {
        eprintln!("Seeded {} readings.", seed.len());
    }
    Ok(())
}
