use serde_json::Value;
use std::collections::HashMap;

use crate::scanning::domain::{DependencyCount, DependencyStats, PackageRecord};
use crate::scanning::services::document_path::{extract, string_field, PathStep};

/// Path to the package array inside a stored BOM document
/// (the GitHub dependency-graph export shape).
const PACKAGES_PATH: [PathStep; 3] = [
    PathStep::Field("sbom"),
    PathStep::Field("packages"),
    PathStep::Each,
];

/// Identity field of a package entry.
const IDENTITY_FIELD: &str = "SPDXID";
const NAME_FIELD: &str = "name";
const VERSION_FIELD: &str = "versionInfo";
const LICENSE_FIELD: &str = "licenseConcluded";

/// Substring marking forge-internal automation packages, which are
/// noise in a third-party dependency ranking. Case-sensitive on
/// purpose: it matches the forge's own SPDXID convention.
const AUTOMATION_FILTER: &str = "githubaction";

/// BomQueryEngine - aggregate queries over schema-less BOM documents.
///
/// Each document's nested package array is treated as a relation
/// without a pre-declared schema: entries are materialized into flat
/// `PackageRecord` rows by tree-walking at query time, then aggregated.
/// The engine is pure; it operates on whatever `(repo_key, document)`
/// pairs the document store hands it, independently of any running
/// scan.
pub struct BomQueryEngine;

impl BomQueryEngine {
    /// Materializes the package entries of one document into flat rows.
    /// Entries without a string identity are dropped. A missing or
    /// malformed packages path contributes zero rows.
    pub fn package_records(document: &Value) -> Vec<PackageRecord> {
        extract(document, &PACKAGES_PATH)
            .into_iter()
            .filter_map(|entry| {
                let identity = string_field(entry, IDENTITY_FIELD)?;
                Some(PackageRecord {
                    identity,
                    name: string_field(entry, NAME_FIELD),
                    version: string_field(entry, VERSION_FIELD),
                    license: string_field(entry, LICENSE_FIELD),
                })
            })
            .collect()
    }

    /// The most common dependencies across all documents, descending by
    /// occurrence count. Ties keep first-seen order across the corpus.
    /// Automation packages are excluded from the ranking.
    pub fn top_dependencies(documents: &[(String, Value)], limit: usize) -> Vec<DependencyCount> {
        // identity -> (count, first-seen index) for a stable tie order
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut next_index = 0usize;

        for (_, document) in documents {
            for record in Self::package_records(document) {
                if record.identity.contains(AUTOMATION_FILTER) {
                    continue;
                }
                let entry = counts.entry(record.identity).or_insert_with(|| {
                    let index = next_index;
                    next_index += 1;
                    (0, index)
                });
                entry.0 += 1;
            }
        }

        let mut ranking: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranking.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranking.truncate(limit);
        ranking
            .into_iter()
            .map(|(identity, (count, _))| DependencyCount { identity, count })
            .collect()
    }

    /// Corpus-wide statistics. Unlike the ranking, the statistics do not
    /// apply the automation filter: they describe everything stored.
    pub fn dependency_stats(documents: &[(String, Value)]) -> DependencyStats {
        let mut unique: HashMap<String, ()> = HashMap::new();
        let mut total = 0usize;

        for (_, document) in documents {
            for record in Self::package_records(document) {
                total += 1;
                unique.entry(record.identity).or_insert(());
            }
        }

        DependencyStats {
            unique_dependencies: unique.len(),
            total_occurrences: total,
            sbom_count: documents.len(),
        }
    }

    /// All package rows of one repository's document, in document order.
    /// Returns an empty list when no document is stored under the key.
    pub fn dependencies_for_repo(
        documents: &[(String, Value)],
        repo_key: &str,
    ) -> Vec<PackageRecord> {
        documents
            .iter()
            .filter(|(key, _)| key == repo_key)
            .flat_map(|(_, document)| Self::package_records(document))
            .collect()
    }

    /// Repository keys with a stored document, lexicographically sorted.
    pub fn repositories_with_documents(documents: &[(String, Value)]) -> Vec<String> {
        let mut keys: Vec<String> = documents.iter().map(|(key, _)| key.clone()).collect();
        keys.sort();
        keys
    }
}
