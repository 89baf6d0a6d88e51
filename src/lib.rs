//! sbomscan - organization-wide SBOM inventory
//!
//! This library fetches the dependency manifest (SBOM) of every public
//! repository in a GitHub organization, stores the documents, and
//! answers aggregate queries over them ("which packages appear across
//! the most repositories?"), following hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): quota pacing policy, session
//!   lifecycle, and the schema-less BOM query engine
//! - **Application Layer** (`application`): use cases, DTOs, and the
//!   live progress registry
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbomscan::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let forge = Arc::new(GitHubForgeClient::new(None)?);
//! let store = Arc::new(SqliteDocumentStore::open("sbom_data.db")?);
//! let reporter = Arc::new(StderrProgressReporter::new());
//!
//! // Create use case and start a scan
//! let use_case = ScanOrganizationUseCase::new(
//!     forge,
//!     Arc::clone(&store),
//!     reporter,
//!     ProgressRegistry::new(),
//! );
//! let handle = use_case.start(ScanRequest::new("acme")).await?;
//! println!("scan session {}", handle.session_id);
//!
//! // Query results at any time, including mid-scan
//! let queries = QueryDependenciesUseCase::new(store);
//! for entry in queries.top_dependencies(10)? {
//!     println!("{}: {}", entry.identity, entry.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{CsvFormatter, HtmlFormatter};
    pub use crate::adapters::outbound::network::GitHubForgeClient;
    pub use crate::adapters::outbound::storage::SqliteDocumentStore;
    pub use crate::application::dto::ScanRequest;
    pub use crate::application::progress::ProgressRegistry;
    pub use crate::application::use_cases::{
        QueryDependenciesUseCase, ScanHandle, ScanOrganizationUseCase,
    };
    pub use crate::ports::outbound::{
        DocumentStore, ForgeClient, OutputPresenter, ProgressReporter, ReportFormatter,
    };
    pub use crate::scanning::domain::{
        AnalysisSession, DependencyCount, DependencyStats, PackageRecord, QuotaState,
        QuotaTracker, RepositoryRef, ScanProgress, SessionStatus, ThrottleDecision,
    };
    pub use crate::scanning::services::BomQueryEngine;
    pub use crate::shared::{ForgeError, Result};
}
