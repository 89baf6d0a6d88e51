use dashmap::DashMap;
use std::sync::Arc;

use crate::scanning::domain::{ScanProgress, SessionStatus};

/// ProgressRegistry - live progress records keyed by session id.
///
/// A dedicated concurrent map owned by the application layer instead of
/// ambient global state. Each record is mutated only by its owning
/// scan task and read by arbitrarily many observers; readers get a
/// cloned snapshot and must tolerate it being momentarily stale.
/// Records live only for the process lifetime - after a restart the
/// session row remains queryable but its live progress is gone.
#[derive(Clone, Default)]
pub struct ProgressRegistry {
    inner: Arc<DashMap<i64, ScanProgress>>,
}

impl ProgressRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Registers a fresh record for a newly started scan.
    pub fn register(&self, session_id: i64, total: usize) {
        self.inner.insert(session_id, ScanProgress::new(total));
    }

    /// A point-in-time snapshot of one scan's progress.
    pub fn snapshot(&self, session_id: i64) -> Option<ScanProgress> {
        self.inner.get(&session_id).map(|entry| entry.value().clone())
    }

    pub fn set_current_repo(&self, session_id: i64, repo_key: &str) {
        if let Some(mut entry) = self.inner.get_mut(&session_id) {
            entry.current_repo = Some(repo_key.to_string());
        }
    }

    pub fn set_processed(&self, session_id: i64, processed: usize) {
        if let Some(mut entry) = self.inner.get_mut(&session_id) {
            entry.processed = processed;
        }
    }

    pub fn record_error(&self, session_id: i64, message: String) {
        if let Some(mut entry) = self.inner.get_mut(&session_id) {
            entry.errors.push(message);
        }
    }

    /// Marks the scan terminal. The current-repository marker is
    /// cleared; the error list stays for inspection.
    pub fn complete(&self, session_id: i64) {
        if let Some(mut entry) = self.inner.get_mut(&session_id) {
            entry.status = SessionStatus::Completed;
            entry.current_repo = None;
        }
    }
}
