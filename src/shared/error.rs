use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the requested command completed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, storage error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors returned by forge API calls.
///
/// The taxonomy matters more than the payload: `OrgNotFound` and
/// `AccessDenied` are terminal and abort scan initiation before any
/// session exists, `QuotaExhausted` is resolved by waiting for the
/// quota window to reset, and `Transient` is recorded per-repository
/// while the batch moves on.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Organization '{org}' not found\n\n💡 Hint: Please check the organization name")]
    OrgNotFound { org: String },

    #[error("Access denied for organization '{org}'\n\n💡 Hint: {hint}")]
    AccessDenied { org: String, hint: String },

    #[error("API quota exhausted{}", reset_epoch.map(|r| format!(" (window resets at epoch {})", r)).unwrap_or_default())]
    QuotaExhausted { reset_epoch: Option<u64> },

    #[error("Forge request failed: {details}")]
    Transient { details: String },
}

impl ForgeError {
    /// Standard hint for access-denied responses, depending on whether
    /// the request carried a token.
    pub fn access_denied_hint(authenticated: bool) -> String {
        if authenticated {
            "The organization might be private or your token may not have sufficient permissions"
                .to_string()
        } else {
            "This organization may require authentication. Please set a GITHUB_TOKEN".to_string()
        }
    }

    /// Terminal errors abort scan initiation; everything else is
    /// recorded per-repository and the batch continues.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ForgeError::OrgNotFound { .. } | ForgeError::AccessDenied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_org_not_found_display() {
        let error = ForgeError::OrgNotFound {
            org: "acme".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'acme' not found"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_access_denied_hint_differs_by_auth() {
        let with_token = ForgeError::access_denied_hint(true);
        let without_token = ForgeError::access_denied_hint(false);
        assert!(with_token.contains("permissions"));
        assert!(without_token.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_quota_exhausted_display_with_reset() {
        let error = ForgeError::QuotaExhausted {
            reset_epoch: Some(1_700_000_000),
        };
        assert!(format!("{}", error).contains("1700000000"));
    }

    #[test]
    fn test_terminal_classification() {
        assert!(ForgeError::OrgNotFound {
            org: "x".to_string()
        }
        .is_terminal());
        assert!(ForgeError::AccessDenied {
            org: "x".to_string(),
            hint: "h".to_string()
        }
        .is_terminal());
        assert!(!ForgeError::Transient {
            details: "timeout".to_string()
        }
        .is_terminal());
        assert!(!ForgeError::QuotaExhausted { reset_epoch: None }.is_terminal());
    }
}
