pub mod package;
pub mod quota;
pub mod repository;
pub mod session;

pub use package::{DependencyCount, DependencyStats, PackageRecord};
pub use quota::{QuotaState, QuotaTracker, ThrottleDecision};
pub use repository::RepositoryRef;
pub use session::{AnalysisSession, ScanProgress, SessionStatus};
