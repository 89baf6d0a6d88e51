/// ScanRequest - Internal request DTO for the organization scan use case.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Name of the organization whose repositories will be scanned.
    pub org_name: String,
}

impl ScanRequest {
    pub fn new(org_name: impl Into<String>) -> Self {
        Self {
            org_name: org_name.into(),
        }
    }
}
