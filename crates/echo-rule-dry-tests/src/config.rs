// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory reporter settings store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use echo_rule_report::{ReportConfigError, ReportStore};

/// [`ReportStore`] holding the settings document in memory.
///
/// Clones share the document and counters, so a test can hand one clone
/// to the code under test and inspect the other.
///
/// ```
/// use echo_rule_dry_tests::MemoryReportStore;
/// use echo_rule_report::ReportConfig;
///
/// let store = MemoryReportStore::new();
/// ReportConfig::default().save(&store).unwrap();
/// assert_eq!(store.writes(), 1);
/// assert!(store.document().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryReportStore {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    document: Mutex<Option<Vec<u8>>>,
    refusal: Mutex<Option<String>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryReportStore {
    /// Store with nothing saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already holding `document`.
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        *store.document_slot() = Some(document.into());
        store
    }

    /// Make every read and write fail with `reason` until [`Self::recover`].
    pub fn refuse(&self, reason: impl Into<String>) {
        *lock(&self.shared.refusal) = Some(reason.into());
    }

    /// Stop refusing operations.
    pub fn recover(&self) {
        *lock(&self.shared.refusal) = None;
    }

    /// Read attempts so far, refused ones included.
    pub fn reads(&self) -> usize {
        self.shared.reads.load(Ordering::Relaxed)
    }

    /// Write attempts so far, refused ones included.
    pub fn writes(&self) -> usize {
        self.shared.writes.load(Ordering::Relaxed)
    }

    /// The stored document.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.document_slot().clone()
    }

    fn document_slot(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        lock(&self.shared.document)
    }

    fn check(&self) -> Result<(), ReportConfigError> {
        lock(&self.shared.refusal)
            .clone()
            .map_or(Ok(()), |reason| Err(ReportConfigError::Unavailable(reason)))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl ReportStore for MemoryReportStore {
    fn read(&self) -> Result<Option<Vec<u8>>, ReportConfigError> {
        self.shared.reads.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        Ok(self.document())
    }

    fn write(&self, document: &[u8]) -> Result<(), ReportConfigError> {
        self.shared.writes.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        *self.document_slot() = Some(document.to_vec());
        Ok(())
    }
}
