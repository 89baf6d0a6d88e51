use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::ports::outbound::ForgeClient;
use crate::scanning::domain::{QuotaState, QuotaTracker, RepositoryRef};
use crate::shared::{ForgeError, Result};

/// Page size for the repository listing. The forge caps pages at 100.
const REPOS_PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct RepoOwnerDto {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepoDto {
    name: String,
    owner: RepoOwnerDto,
    #[serde(default)]
    visibility: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    core: RateLimitWindow,
}

#[derive(Debug, Deserialize)]
struct RateLimitWindow {
    limit: u32,
    remaining: u32,
    reset: u64,
}

#[derive(Debug, Deserialize)]
struct RateLimitDto {
    resources: RateLimitResources,
}

/// GitHubForgeClient adapter for the GitHub REST API.
///
/// Implements the ForgeClient port over reqwest. Every response carries
/// rate-limit headers; when a request comes back quota-exhausted with a
/// known reset time, the client blocks until the window resets (plus a
/// small buffer) and retries the same request, up to a fixed bound.
/// Other failures are not retried here - retry-or-abandon per
/// repository is the batch's decision.
pub struct GitHubForgeClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    max_retries: u32,
}

impl GitHubForgeClient {
    /// Creates a client against the public GitHub API.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url("https://api.github.com", token)
    }

    /// Creates a client against an explicit API base URL (GitHub
    /// Enterprise, or a stub server in tests).
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("sbomscan/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            max_retries: 3,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Validates a URL path component before interpolating it.
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.is_empty() {
            anyhow::bail!("{} must not be empty", component_type);
        }
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }
        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }
        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!(
                "Security: {} contains URL-unsafe characters",
                component_type
            );
        }
        Ok(())
    }

    /// Reads the rate-limit window out of response headers.
    fn quota_from_headers(headers: &HeaderMap, authenticated: bool) -> QuotaState {
        let parse = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
        };

        QuotaState {
            limit: parse("x-ratelimit-limit").map(|v| v as u32),
            remaining: parse("x-ratelimit-remaining").map(|v| v as u32),
            reset_epoch: parse("x-ratelimit-reset"),
            authenticated,
        }
    }

    fn now_epoch() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Issues one GET, waiting out quota exhaustion when the reset time
    /// is known. At most `max_retries` waits per request; a response
    /// that is still quota-exhausted afterwards surfaces as
    /// `QuotaExhausted`.
    async fn get(&self, url: &str) -> std::result::Result<reqwest::Response, ForgeError> {
        let mut attempt = 0u32;
        loop {
            let mut request = self
                .client
                .get(url)
                .header("Accept", "application/vnd.github.v3+json");
            if let Some(token) = &self.token {
                request = request.header("Authorization", format!("token {}", token));
            }

            let response = request.send().await.map_err(|e| ForgeError::Transient {
                details: format!("Request to {} failed: {}", url, e),
            })?;

            if response.status() == StatusCode::FORBIDDEN {
                let quota =
                    Self::quota_from_headers(response.headers(), self.is_authenticated());
                if quota.remaining == Some(0) {
                    // Quota exhaustion is a wait, not a failure, as long
                    // as the reset time is known and retries remain.
                    match QuotaTracker::reset_wait(quota.reset_epoch, Self::now_epoch()) {
                        Some(wait) if attempt < self.max_retries => {
                            attempt += 1;
                            tokio::time::sleep(wait).await;
                            continue;
                        }
                        _ => {
                            return Err(ForgeError::QuotaExhausted {
                                reset_epoch: quota.reset_epoch,
                            })
                        }
                    }
                }
            }

            return Ok(response);
        }
    }

    async fn list_page(
        &self,
        org: &str,
        page: usize,
    ) -> std::result::Result<Vec<RepoDto>, ForgeError> {
        let url = format!(
            "{}/orgs/{}/repos?per_page={}&page={}",
            self.base_url,
            urlencoding::encode(org),
            REPOS_PER_PAGE,
            page
        );
        let response = self.get(&url).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ForgeError::OrgNotFound {
                org: org.to_string(),
            }),
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Err(ForgeError::AccessDenied {
                org: org.to_string(),
                hint: ForgeError::access_denied_hint(self.is_authenticated()),
            }),
            status if status.is_success() => {
                response.json().await.map_err(|e| ForgeError::Transient {
                    details: format!("Malformed repository listing for '{}': {}", org, e),
                })
            }
            status => Err(ForgeError::Transient {
                details: format!("Repository listing for '{}' returned status {}", org, status),
            }),
        }
    }
}

#[async_trait]
impl ForgeClient for GitHubForgeClient {
    async fn list_repositories(&self, org: &str) -> std::result::Result<Vec<RepositoryRef>, ForgeError> {
        Self::validate_url_component(org, "Organization name").map_err(|e| {
            ForgeError::Transient {
                details: e.to_string(),
            }
        })?;

        let mut repositories = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.list_page(org, page).await?;
            let batch_len = batch.len();
            for repo in batch {
                let visibility = repo.visibility.unwrap_or_else(|| "public".to_string());
                let reference = RepositoryRef::new(repo.owner.login, repo.name, visibility);
                if reference.is_public() {
                    repositories.push(reference);
                }
            }
            if batch_len < REPOS_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(repositories)
    }

    async fn fetch_bom(
        &self,
        owner: &str,
        repo: &str,
    ) -> std::result::Result<Option<Value>, ForgeError> {
        for (component, label) in [(owner, "Repository owner"), (repo, "Repository name")] {
            Self::validate_url_component(component, label).map_err(|e| ForgeError::Transient {
                details: e.to_string(),
            })?;
        }

        let url = format!(
            "{}/repos/{}/{}/dependency-graph/sbom",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let response = self.get(&url).await?;

        match response.status() {
            status if status.is_success() => {
                let document = response.json().await.map_err(|e| ForgeError::Transient {
                    details: format!("Malformed BOM document for {}/{}: {}", owner, repo, e),
                })?;
                Ok(Some(document))
            }
            // Dependency graph disabled, repository missing, or access
            // denied for this one repository: absent, not an error.
            StatusCode::NOT_FOUND
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY => Ok(None),
            status => Err(ForgeError::Transient {
                details: format!("BOM fetch for {}/{} returned status {}", owner, repo, status),
            }),
        }
    }

    async fn quota_state(&self) -> QuotaState {
        let url = format!("{}/rate_limit", self.base_url);
        let response = match self.get(&url).await {
            Ok(response) if response.status().is_success() => response,
            _ => return QuotaState::unknown(),
        };

        match response.json::<RateLimitDto>().await {
            Ok(dto) => QuotaState::new(
                dto.resources.core.limit,
                dto.resources.core.remaining,
                dto.resources.core.reset,
                self.is_authenticated(),
            ),
            Err(_) => QuotaState::unknown(),
        }
    }
}
