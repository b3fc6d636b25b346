//! Local persistence for furnace temperature readings.
//!
//! Readings are kept in a single JSON document holding a list of
//! `{"date": "dd.MM.yyyy HH:mm", "temperature": <int>}` objects, at most one
//! per hour. The document is always read and replaced as a whole.
//!
//! # Features
//!
//! - Hour-bucketed upsert: a second reading in the same hour overwrites the first
//! - Sorted read-back regardless of on-disk order
//! - First-run seeding from bundled data
//! - Failures degrade to empty results and are kept as diagnostics
//!
//! # Example
//!
//! ```no_run
//! use furnace_store::ReadingStore;
//! use time::OffsetDateTime;
//!
//! let store = ReadingStore::open_default();
//! store.upsert(750, OffsetDateTime::now_utc());
//!
//! for reading in store.read_all() {
//!     println!("{}", reading);
//! }
//! ```

mod backend;
mod error;
mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{Error, Result};
pub use store::{DiagnosticKind, ReadingStore, StoreDiagnostic};

/// Default readings file following platform conventions.
///
/// - Linux: `~/.local/share/furnace/readings.json`
/// - macOS: `~/Library/Application Support/furnace/readings.json`
/// - Windows: `C:\Users\<user>\AppData\Local\furnace\readings.json`
pub fn default_store_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("furnace")
        .join("readings.json")
}
