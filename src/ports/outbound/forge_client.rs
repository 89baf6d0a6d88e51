use async_trait::async_trait;
use serde_json::Value;

use crate::scanning::domain::{QuotaState, RepositoryRef};
use crate::shared::ForgeError;

/// ForgeClient port for talking to the remote code-hosting service.
///
/// Implementations own their retry discipline: a request blocked by
/// quota exhaustion with a known reset time is an internal wait-then-
/// retry, not an error the caller sees. Everything surfaced through
/// `ForgeError` is either terminal (unknown org, denied org) or a
/// per-repository failure the batch records and moves past.
#[async_trait]
pub trait ForgeClient: Send + Sync {
    /// Lists the public repositories of an organization.
    ///
    /// # Errors
    /// `OrgNotFound` and `AccessDenied` are terminal; `Transient`
    /// covers network failures and malformed responses.
    async fn list_repositories(&self, org: &str) -> Result<Vec<RepositoryRef>, ForgeError>;

    /// Fetches the BOM document of one repository.
    ///
    /// Returns `Ok(None)` when the document is unavailable for a
    /// normal, expected reason (dependency graph disabled, repository
    /// not found, access denied for that repository). Absence never
    /// aborts a batch.
    async fn fetch_bom(&self, owner: &str, repo: &str) -> Result<Option<Value>, ForgeError>;

    /// Best-effort poll of the current quota window. Failures return
    /// `QuotaState::unknown()` rather than an error.
    async fn quota_state(&self) -> QuotaState;
}
