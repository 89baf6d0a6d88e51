use anyhow::bail;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::dto::ScanRequest;
use crate::application::progress::ProgressRegistry;
use crate::ports::outbound::{DocumentStore, ForgeClient, ProgressReporter};
use crate::scanning::domain::{QuotaState, QuotaTracker, RepositoryRef, SessionStatus};
use crate::shared::Result;

/// Handle returned by a started scan: the session id for observers and
/// the join handle of the background task. Callers are free to drop
/// the handle - the scan keeps running to completion on its own.
#[derive(Debug)]
pub struct ScanHandle {
    pub session_id: i64,
    pub join: JoinHandle<()>,
}

/// ScanOrganizationUseCase - drives one full organization scan.
///
/// Lists the organization's repositories once, then works through them
/// strictly sequentially in one background task, fetching and storing
/// each repository's BOM. Every listed repository is counted as
/// processed exactly once, whether its fetch succeeded, came back
/// absent, or failed; failures are appended to the progress record and
/// the batch moves on. The session therefore always terminates in
/// `completed` - there is no failed terminal state.
///
/// Multiple scans may run concurrently, each with its own session and
/// progress record. They share the forge's quota budget without
/// coordinating, which can starve one another - a documented
/// limitation.
///
/// # Type Parameters
/// * `FC` - ForgeClient implementation
/// * `DS` - DocumentStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanOrganizationUseCase<FC, DS, PR> {
    forge: Arc<FC>,
    store: Arc<DS>,
    reporter: Arc<PR>,
    progress: ProgressRegistry,
}

impl<FC, DS, PR> ScanOrganizationUseCase<FC, DS, PR>
where
    FC: ForgeClient + 'static,
    DS: DocumentStore + 'static,
    PR: ProgressReporter + Send + Sync + 'static,
{
    /// Creates a new use case with injected dependencies.
    pub fn new(
        forge: Arc<FC>,
        store: Arc<DS>,
        reporter: Arc<PR>,
        progress: ProgressRegistry,
    ) -> Self {
        Self {
            forge,
            store,
            reporter,
            progress,
        }
    }

    /// Starts a scan and returns as soon as the session exists.
    ///
    /// Repository listing happens before any session is created, so a
    /// terminal failure (unknown organization, denied access, empty
    /// listing) surfaces here and leaves no trace in the store. The
    /// actual fetching runs in a spawned background task.
    pub async fn start(&self, request: ScanRequest) -> Result<ScanHandle> {
        let org = request.org_name.trim().to_string();
        if org.is_empty() {
            bail!("Please enter an organization name");
        }

        self.reporter
            .report(&format!("🔍 Listing repositories of {}...", org));
        let repositories = self.forge.list_repositories(&org).await?;
        if repositories.is_empty() {
            bail!("No public repositories found for organization: {}", org);
        }

        let session_id = self.store.create_session(&org, repositories.len())?;
        self.progress.register(session_id, repositories.len());
        self.reporter.report(&format!(
            "📦 Scan started for {} with {} repositories (session {})",
            org,
            repositories.len(),
            session_id
        ));

        let forge = Arc::clone(&self.forge);
        let store = Arc::clone(&self.store);
        let reporter = Arc::clone(&self.reporter);
        let progress = self.progress.clone();
        let join = tokio::spawn(async move {
            run_scan(forge, store, reporter, progress, session_id, repositories).await;
        });

        Ok(ScanHandle { session_id, join })
    }

    /// Observer access to the live progress record.
    pub fn progress(&self) -> &ProgressRegistry {
        &self.progress
    }
}

/// The scan loop. Runs to completion no matter what individual
/// repositories do; only the initial listing (already done by the
/// caller) can abort a scan.
async fn run_scan<FC, DS, PR>(
    forge: Arc<FC>,
    store: Arc<DS>,
    reporter: Arc<PR>,
    progress: ProgressRegistry,
    session_id: i64,
    repositories: Vec<RepositoryRef>,
) where
    FC: ForgeClient,
    DS: DocumentStore,
    PR: ProgressReporter + Send + Sync,
{
    let total = repositories.len();
    let mut processed = 0usize;
    let mut quota = QuotaState::unknown();

    for repository in &repositories {
        let repo_key = repository.full_name();
        progress.set_current_repo(session_id, &repo_key);
        reporter.report_progress(processed, total, Some(&repo_key));

        match forge.fetch_bom(&repository.owner, &repository.name).await {
            Ok(Some(document)) => {
                // A dropped write is logged and the repository still
                // counts as processed, keeping progress monotonic.
                if let Err(e) = store.put_document(&repo_key, &document) {
                    reporter.report_error(&format!("⚠️  Failed to store BOM for {}: {}", repo_key, e));
                }
            }
            Ok(None) => {
                // Dependency graph disabled or repository inaccessible:
                // a normal outcome, nothing to record.
            }
            Err(e) => {
                let message = format!("Error processing {}: {}", repo_key, e);
                reporter.report_error(&format!("⚠️  {}", message));
                progress.record_error(session_id, message);
            }
        }

        processed += 1;
        progress.set_processed(session_id, processed);
        if let Err(e) = store.update_session(session_id, processed, SessionStatus::Processing) {
            reporter.report_error(&format!("⚠️  Failed to persist session progress: {}", e));
        }

        // Monitoring poll: warn when the window is running out.
        if processed % QuotaTracker::MONITOR_INTERVAL == 0 {
            quota = forge.quota_state().await;
            if QuotaTracker::should_warn_periodic(&quota) {
                reporter.report_error(&format!(
                    "⚠️  Rate limit running low: {} requests remaining",
                    quota.remaining.unwrap_or(0)
                ));
            }
        }

        // Adaptive pacing: refresh the observation every 5th repository
        // and stretch the delay when the quota runs low.
        if processed % QuotaTracker::PACING_INTERVAL == 0 {
            quota = forge.quota_state().await;
            if QuotaTracker::should_warn(&quota) {
                reporter.report_error(&format!(
                    "⚠️  Rate limit running low: {} requests remaining",
                    quota.remaining.unwrap_or(0)
                ));
            }
        }
        let decision = QuotaTracker::pacing(&quota, processed);
        tokio::time::sleep(decision.delay()).await;
    }

    if let Err(e) = store.update_session(session_id, processed, SessionStatus::Completed) {
        reporter.report_error(&format!("⚠️  Failed to mark session completed: {}", e));
    }
    progress.complete(session_id);
    reporter.report_completion(&format!(
        "✅ Scan completed: {}/{} repositories processed",
        processed, total
    ));
}
