//! Main store implementation.

use std::fmt;
use std::path::Path;
use std::sync::Mutex;

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use furnace_types::{Reading, sort_by_bucket, truncate_to_hour};

use crate::backend::{FileBackend, StorageBackend};

/// What kind of failure the store swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The document could not be read.
    Read,
    /// The document was present but not a valid reading list.
    Parse,
    /// The document could not be written; the change was lost.
    Write,
}

/// A storage failure that was degraded instead of returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for StoreDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Hour-bucketed reading store over a single JSON document.
///
/// None of the operations fail. Read and parse failures degrade to an empty
/// collection, write failures drop the change. Every such failure is logged
/// and kept as a [`StoreDiagnostic`].
///
/// The store assumes it is the only writer of its document.
pub struct ReadingStore {
    backend: Box<dyn StorageBackend>,
    diagnostics: Mutex<Vec<StoreDiagnostic>>,
}

impl fmt::Debug for ReadingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingStore")
            .field("backend", &self.backend.describe())
            .finish()
    }
}

impl ReadingStore {
    /// Create a store over any backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    /// Open a store backed by the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        debug!("Using readings file {}", path.as_ref().display());
        Self::new(FileBackend::new(path))
    }

    /// Open the store at the default location.
    pub fn open_default() -> Self {
        Self::open(crate::default_store_path())
    }

    /// Store (or overwrite) the temperature for the hour containing `now`.
    ///
    /// Loads the whole collection, applies the change and writes it back.
    pub fn upsert(&self, temperature: i32, now: OffsetDateTime) {
        let bucket = truncate_to_hour(now);
        let mut readings = self.load();

        match readings
            .iter_mut()
            .find(|r| r.bucket_time().is_ok_and(|t| t == bucket))
        {
            Some(existing) => {
                debug!(
                    "Replacing {} °C with {} °C for {}",
                    existing.temperature_celsius, temperature, existing.bucket
                );
                existing.temperature_celsius = temperature;
            }
            None => {
                let reading = Reading::new(bucket, temperature);
                debug!("Appending {}", reading);
                readings.push(reading);
            }
        }

        self.persist(&readings);
    }

    /// All readings sorted by bucket ascending.
    ///
    /// Empty when the document is absent, empty or unparseable.
    pub fn read_all(&self) -> Vec<Reading> {
        let mut readings = self.load();
        sort_by_bucket(&mut readings);
        readings
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.read_all().pop()
    }

    /// Write `seed` as the initial collection if nothing was ever persisted.
    ///
    /// An existing document is left alone, even when it is empty.
    pub fn ensure_seeded(&self, seed: &[Reading]) {
        if self.backend.exists() {
            debug!("Store {} already initialized", self.backend.describe());
            return;
        }

        info!(
            "Seeding {} with {} readings",
            self.backend.describe(),
            seed.len()
        );
        self.persist(seed);
    }

    /// Whether a document has been persisted.
    pub fn is_initialized(&self) -> bool {
        self.backend.exists()
    }

    /// Overwrite the whole collection with `readings`.
    pub fn replace_all(&self, readings: &[Reading]) {
        info!(
            "Replacing {} with {} readings",
            self.backend.describe(),
            readings.len()
        );
        self.persist(readings);
    }

    /// Drain the failures recorded since the last call.
    pub fn take_diagnostics(&self) -> Vec<StoreDiagnostic> {
        std::mem::take(&mut *self.lock_diagnostics())
    }

    fn load(&self) -> Vec<Reading> {
        let content = match self.backend.read() {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                self.record(DiagnosticKind::Read, e.to_string());
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Reading>>(&content) {
            Ok(readings) => readings,
            Err(e) => {
                self.record(DiagnosticKind::Parse, e.to_string());
                Vec::new()
            }
        }
    }

    fn persist(&self, readings: &[Reading]) {
        let result = serde_json::to_string_pretty(readings)
            .map_err(crate::Error::from)
            .and_then(|json| self.backend.write(&json));

        if let Err(e) = result {
            self.record(DiagnosticKind::Write, e.to_string());
        }
    }

    fn record(&self, kind: DiagnosticKind, message: String) {
        warn!(
            "Readings store {} {:?} failure: {}",
            self.backend.describe(),
            kind,
            message
        );
        self.lock_diagnostics()
            .push(StoreDiagnostic { kind, message });
    }

    fn lock_diagnostics(&self) -> std::sync::MutexGuard<'_, Vec<StoreDiagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use proptest::prelude::*;
    use std::sync::Arc;
    use time::macros::datetime;

    /// Lets a test keep a handle on the backend it gave to the store.
    struct Shared(Arc<MemoryBackend>);

    impl StorageBackend for Shared {
        fn exists(&self) -> bool {
            self.0.exists()
        }
        fn read(&self) -> crate::Result<Option<String>> {
            self.0.read()
        }
        fn write(&self, contents: &str) -> crate::Result<()> {
            self.0.write(contents)
        }
        fn describe(&self) -> String {
            self.0.describe()
        }
    }

    fn shared_store(backend: MemoryBackend) -> (ReadingStore, Arc<MemoryBackend>) {
        let backend = Arc::new(backend);
        (ReadingStore::new(Shared(Arc::clone(&backend))), backend)
    }

    fn reading(bucket: &str, temperature: i32) -> Reading {
        Reading {
            bucket: bucket.to_string(),
            temperature_celsius: temperature,
        }
    }

    #[test]
    fn test_read_all_empty_store() {
        let store = ReadingStore::new(MemoryBackend::new());
        assert!(store.read_all().is_empty());
        assert!(store.take_diagnostics().is_empty());
    }

    #[test]
    fn test_read_all_empty_document() {
        let store = ReadingStore::new(MemoryBackend::with_contents("  \n"));
        assert!(store.read_all().is_empty());
        assert!(store.take_diagnostics().is_empty());
    }

    #[test]
    fn test_read_all_malformed_document() {
        let store = ReadingStore::new(MemoryBackend::with_contents("{not json"));
        assert!(store.read_all().is_empty());

        let diagnostics = store.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Parse);
        assert!(store.take_diagnostics().is_empty());
    }

    #[test]
    fn test_read_failure_degrades_to_empty() {
        let backend = MemoryBackend::with_contents("[]");
        backend.set_fail_reads(true);
        let store = ReadingStore::new(backend);

        assert!(store.read_all().is_empty());
        assert_eq!(store.take_diagnostics()[0].kind, DiagnosticKind::Read);
    }

    #[test]
    fn test_seed_then_read_sorted() {
        let store = ReadingStore::new(MemoryBackend::new());
        let seed = vec![
            reading("02.01.2024 10:00", 700),
            reading("01.01.2024 10:00", 500),
            reading("01.01.2024 11:00", 600),
        ];
        store.ensure_seeded(&seed);

        let all = store.read_all();
        assert_eq!(
            all,
            vec![
                reading("01.01.2024 10:00", 500),
                reading("01.01.2024 11:00", 600),
                reading("02.01.2024 10:00", 700),
            ]
        );
    }

    #[test]
    fn test_seed_written_verbatim() {
        let (store, backend) = shared_store(MemoryBackend::new());
        let seed = vec![reading("02.01.2024 10:00", 700), reading("01.01.2024 10:00", 500)];
        store.ensure_seeded(&seed);

        let on_disk: Vec<Reading> = serde_json::from_str(&backend.contents().unwrap()).unwrap();
        assert_eq!(on_disk, seed);
    }

    #[test]
    fn test_ensure_seeded_is_noop_when_document_exists() {
        let store = ReadingStore::new(MemoryBackend::with_contents(""));
        store.ensure_seeded(&[reading("01.01.2024 10:00", 500)]);
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn test_ensure_seeded_twice_keeps_first_seed() {
        let store = ReadingStore::new(MemoryBackend::new());
        store.ensure_seeded(&[reading("01.01.2024 10:00", 500)]);
        store.ensure_seeded(&[reading("01.01.2024 11:00", 900)]);

        assert_eq!(store.read_all(), vec![reading("01.01.2024 10:00", 500)]);
    }

    #[test]
    fn test_replace_all_overwrites_existing() {
        let store = ReadingStore::new(MemoryBackend::new());
        assert!(!store.is_initialized());

        store.ensure_seeded(&[reading("01.01.2024 10:00", 500)]);
        assert!(store.is_initialized());

        store.replace_all(&[reading("03.01.2024 09:00", 1100)]);
        assert_eq!(store.read_all(), vec![reading("03.01.2024 09:00", 1100)]);
    }

    #[test]
    fn test_upsert_collides_with_seed_bucket() {
        let store = ReadingStore::new(MemoryBackend::new());
        store.ensure_seeded(&[reading("01.01.2024 10:00", 500)]);

        store.upsert(600, datetime!(2024-01-01 10:30 UTC));

        assert_eq!(store.read_all(), vec![reading("01.01.2024 10:00", 600)]);
    }

    #[test]
    fn test_upsert_appends_new_bucket() {
        let store = ReadingStore::new(MemoryBackend::new());
        store.upsert(600, datetime!(2024-01-01 11:05 UTC));
        store.upsert(500, datetime!(2024-01-01 10:59 UTC));

        assert_eq!(
            store.read_all(),
            vec![
                reading("01.01.2024 10:00", 500),
                reading("01.01.2024 11:00", 600)
            ]
        );
        assert_eq!(store.latest(), Some(reading("01.01.2024 11:00", 600)));
    }

    #[test]
    fn test_upsert_same_hour_keeps_last_value() {
        let store = ReadingStore::new(MemoryBackend::new());
        for (minute, temp) in [(0, 100), (15, 300), (59, 250)] {
            let now = datetime!(2024-01-01 10:00 UTC) + time::Duration::minutes(minute);
            store.upsert(temp, now);
        }

        assert_eq!(store.read_all(), vec![reading("01.01.2024 10:00", 250)]);
    }

    #[test]
    fn test_upsert_over_malformed_document_starts_fresh() {
        let store = ReadingStore::new(MemoryBackend::with_contents("[{\"date\": 5}]"));
        store.upsert(800, datetime!(2024-05-01 08:20 UTC));

        assert_eq!(store.read_all(), vec![reading("01.05.2024 08:00", 800)]);
        assert_eq!(store.take_diagnostics()[0].kind, DiagnosticKind::Parse);
    }

    #[test]
    fn test_upsert_write_failure_is_swallowed() {
        let (store, backend) = shared_store(MemoryBackend::new());
        backend.set_fail_writes(true);

        store.upsert(800, datetime!(2024-05-01 08:20 UTC));

        assert!(store.read_all().is_empty());
        assert_eq!(store.take_diagnostics()[0].kind, DiagnosticKind::Write);
    }

    #[test]
    fn test_unparseable_bucket_survives_upsert() {
        let store = ReadingStore::new(MemoryBackend::with_contents(
            r#"[{"date": "soon", "temperature": 1}]"#,
        ));
        store.upsert(42, datetime!(2024-05-01 08:20 UTC));

        let all = store.read_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], reading("soon", 1));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");

        let store = ReadingStore::open(&path);
        store.ensure_seeded(&[reading("01.01.2024 10:00", 500)]);
        store.upsert(600, datetime!(2024-01-01 10:30 UTC));

        let reopened = ReadingStore::open(&path);
        assert_eq!(reopened.read_all(), vec![reading("01.01.2024 10:00", 600)]);
    }

    proptest! {
        #[test]
        fn prop_upserts_keep_buckets_unique_and_sorted(
            ops in proptest::collection::vec((0i64..200_000, -50i32..1600), 0..40)
        ) {
            let store = ReadingStore::new(MemoryBackend::new());
            for (minutes, temp) in &ops {
                let now = datetime!(2024-01-01 00:00 UTC) + time::Duration::minutes(*minutes);
                store.upsert(*temp, now);
            }

            let all = store.read_all();
            let keys: Vec<i64> = all.iter().map(Reading::sort_key).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));

            // Each bucket holds the value of the last upsert into that hour.
            for reading in &all {
                let key = reading.sort_key();
                let last = ops
                    .iter()
                    .filter(|(m, _)| {
                        let t = datetime!(2024-01-01 00:00 UTC) + time::Duration::minutes(*m);
                        Reading::at(t, 0).sort_key() == key
                    })
                    .map(|(_, temp)| *temp)
                    .last();
                prop_assert_eq!(Some(reading.temperature_celsius), last);
            }
        }
    }
}
