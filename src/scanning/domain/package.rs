/// One package entry extracted from a stored BOM document.
///
/// Only the identity is guaranteed; BOM documents are schema-less and
/// any of the descriptive fields may be absent. Absent fields surface
/// as `None`, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub identity: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
}

/// One row of the top-dependencies ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCount {
    pub identity: String,
    pub count: usize,
}

/// Corpus-wide aggregates over all stored documents.
///
/// `unique_dependencies` counts distinct identities,
/// `total_occurrences` counts every package entry, so the former can
/// never exceed the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependencyStats {
    pub unique_dependencies: usize,
    pub total_occurrences: usize,
    pub sbom_count: usize,
}
