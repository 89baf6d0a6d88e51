use async_trait::async_trait;
use sbomscan::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Outcome of a mocked BOM fetch for one repository.
pub enum BomOutcome {
    Document(Value),
    Absent,
    Fail(String),
}

enum ListOutcome {
    Repositories,
    OrgNotFound,
    AccessDenied,
}

/// Mock ForgeClient for testing the scan orchestrator.
pub struct MockForgeClient {
    repos: Vec<RepositoryRef>,
    boms: HashMap<String, BomOutcome>,
    list_outcome: ListOutcome,
    quota: QuotaState,
    fetch_delay: Option<Duration>,
}

impl MockForgeClient {
    pub fn new() -> Self {
        Self {
            repos: Vec::new(),
            boms: HashMap::new(),
            list_outcome: ListOutcome::Repositories,
            quota: QuotaState::new(5000, 4000, 0, true),
            fetch_delay: None,
        }
    }

    pub fn with_repo(mut self, owner: &str, name: &str, outcome: BomOutcome) -> Self {
        let repo = RepositoryRef::new(owner, name, "public");
        self.boms.insert(repo.full_name(), outcome);
        self.repos.push(repo);
        self
    }

    pub fn org_not_found() -> Self {
        Self {
            list_outcome: ListOutcome::OrgNotFound,
            ..Self::new()
        }
    }

    pub fn access_denied() -> Self {
        Self {
            list_outcome: ListOutcome::AccessDenied,
            ..Self::new()
        }
    }

    pub fn with_quota(mut self, quota: QuotaState) -> Self {
        self.quota = quota;
        self
    }

    /// Delay injected before every BOM fetch, for paused-time tests.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }
}

impl Default for MockForgeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForgeClient for MockForgeClient {
    async fn list_repositories(
        &self,
        org: &str,
    ) -> std::result::Result<Vec<RepositoryRef>, ForgeError> {
        match self.list_outcome {
            ListOutcome::Repositories => Ok(self.repos.clone()),
            ListOutcome::OrgNotFound => Err(ForgeError::OrgNotFound {
                org: org.to_string(),
            }),
            ListOutcome::AccessDenied => Err(ForgeError::AccessDenied {
                org: org.to_string(),
                hint: ForgeError::access_denied_hint(false),
            }),
        }
    }

    async fn fetch_bom(
        &self,
        owner: &str,
        repo: &str,
    ) -> std::result::Result<Option<Value>, ForgeError> {
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        match self.boms.get(&format!("{}/{}", owner, repo)) {
            Some(BomOutcome::Document(document)) => Ok(Some(document.clone())),
            Some(BomOutcome::Absent) | None => Ok(None),
            Some(BomOutcome::Fail(details)) => Err(ForgeError::Transient {
                details: details.clone(),
            }),
        }
    }

    async fn quota_state(&self) -> QuotaState {
        self.quota.clone()
    }
}
