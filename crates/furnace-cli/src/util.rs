//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use furnace_store::ReadingStore;

/// Write `content` to `output`, or to stdout when no file is given.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

/// Print storage failures the store swallowed during the last command.
pub fn report_store_diagnostics(store: &ReadingStore, quiet: bool) {
    for diagnostic in store.take_diagnostics() {
        if !quiet {
            eprintln!(
                "Warning: readings file {:?} failure: {}",
                diagnostic.kind, diagnostic.message
            );
        }
    }
}
