use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of one scan. Transitions only move forward:
/// `Pending -> Processing -> Completed`. There is no failed terminal
/// state; per-repository failures live in the progress error list and
/// the session still completes once every repository was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Pending,
    Processing,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Processing => "processing",
            SessionStatus::Completed => "completed",
        }
    }

    /// Ordering rank used to enforce that status never regresses.
    fn rank(&self) -> u8 {
        match self {
            SessionStatus::Pending => 0,
            SessionStatus::Processing => 1,
            SessionStatus::Completed => 2,
        }
    }

    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SessionStatus::Pending),
            "processing" => Ok(SessionStatus::Processing),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(format!("Invalid session status: {}", other)),
        }
    }
}

/// The persisted record of one scan, created when the scan is requested
/// and kept indefinitely for historical display.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: i64,
    pub org_name: String,
    pub total_repos: usize,
    pub processed_repos: usize,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Live, in-memory view of a running scan. Owned by the scan's task,
/// read by arbitrarily many observers through the progress registry.
/// Lost on restart; the session row remains queryable.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    pub status: SessionStatus,
    pub processed: usize,
    pub total: usize,
    pub current_repo: Option<String>,
    pub errors: Vec<String>,
}

impl ScanProgress {
    pub fn new(total: usize) -> Self {
        Self {
            status: SessionStatus::Processing,
            processed: 0,
            total,
            current_repo: None,
            errors: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SessionStatus::Pending,
            SessionStatus::Processing,
            SessionStatus::Completed,
        ] {
            assert_eq!(SessionStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_from_str_invalid() {
        assert!(SessionStatus::from_str("failed").is_err());
        assert!(SessionStatus::from_str("").is_err());
    }

    #[test]
    fn test_status_never_regresses() {
        assert!(SessionStatus::Pending.can_transition_to(SessionStatus::Processing));
        assert!(SessionStatus::Processing.can_transition_to(SessionStatus::Completed));
        assert!(SessionStatus::Completed.can_transition_to(SessionStatus::Completed));
        assert!(!SessionStatus::Completed.can_transition_to(SessionStatus::Processing));
        assert!(!SessionStatus::Processing.can_transition_to(SessionStatus::Pending));
    }

    #[test]
    fn test_new_progress_starts_processing() {
        let progress = ScanProgress::new(42);
        assert_eq!(progress.status, SessionStatus::Processing);
        assert_eq!(progress.processed, 0);
        assert_eq!(progress.total, 42);
        assert!(progress.current_repo.is_none());
        assert!(progress.errors.is_empty());
        assert!(!progress.is_completed());
    }
}
