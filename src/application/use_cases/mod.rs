mod query_dependencies;
mod scan_organization;

pub use query_dependencies::QueryDependenciesUseCase;
pub use scan_organization::{ScanHandle, ScanOrganizationUseCase};
