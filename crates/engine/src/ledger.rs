use crate::event::SuppressReason;
use hashbrown::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant, SystemTime};

/// Last successful copy of one file, as seen by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRecord {
    /// Source mtime at the time of the copy.
    pub source_modified: SystemTime,
    /// When the copy finished.
    pub copied_at: Instant,
}

/// In-memory record store keyed by file name.
///
/// Lives for one watch session only. The lock is taken per lookup or update
/// and never held across a copy.
#[derive(Debug, Default)]
pub struct CopyLedger {
    records: Mutex<HashMap<String, CopyRecord>>,
}

impl CopyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the debounce filter, then the staleness filter.
    ///
    /// Returns `Some(reason)` when the change must be dropped. Files without
    /// a record always pass.
    pub fn check(
        &self,
        name: &str,
        source_modified: SystemTime,
        now: Instant,
        debounce: Duration,
    ) -> Option<SuppressReason> {
        let records = self.lock();
        let record = records.get(name)?;

        if now.saturating_duration_since(record.copied_at) < debounce {
            return Some(SuppressReason::Debounced);
        }
        if source_modified <= record.source_modified {
            return Some(SuppressReason::Unchanged);
        }
        None
    }

    pub fn record(&self, name: &str, source_modified: SystemTime, copied_at: Instant) {
        self.lock().insert(
            name.to_string(),
            CopyRecord {
                source_modified,
                copied_at,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<CopyRecord> {
        self.lock().get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock leaves plain timestamps behind, which
    // are still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CopyRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
