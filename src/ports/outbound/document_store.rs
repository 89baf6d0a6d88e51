use serde_json::Value;

use crate::scanning::domain::{AnalysisSession, SessionStatus};
use crate::shared::Result;

/// DocumentStore port for the durable BOM and session tables.
///
/// All operations are synchronous and individually atomic; every write
/// targets a single logical record, so no multi-statement transactions
/// are needed. Storage failures during a scan are logged and dropped
/// by the caller - they never abort a batch.
pub trait DocumentStore: Send + Sync {
    /// Idempotent upsert of one repository's BOM document. A later
    /// write for the same key replaces the prior document.
    fn put_document(&self, repo_key: &str, document: &Value) -> Result<()>;

    /// Number of stored BOM documents.
    fn document_count(&self) -> Result<usize>;

    /// Every stored `(repo_key, document)` pair, in insertion order.
    fn all_documents(&self) -> Result<Vec<(String, Value)>>;

    /// Creates a session for a new scan and returns its id.
    fn create_session(&self, org_name: &str, total_repos: usize) -> Result<i64>;

    /// Updates a session's progress. The processed count is monotonic:
    /// an update can never lower it. Completing a session stamps
    /// `completed_at`; a completed session never regresses.
    fn update_session(&self, id: i64, processed: usize, status: SessionStatus) -> Result<()>;

    /// Looks up one session by id.
    fn session(&self, id: i64) -> Result<Option<AnalysisSession>>;

    /// The most recent sessions, newest first.
    fn recent_sessions(&self, limit: usize) -> Result<Vec<AnalysisSession>>;
}
