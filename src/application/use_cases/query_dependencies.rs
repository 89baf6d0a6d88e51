use std::sync::Arc;

use crate::ports::outbound::DocumentStore;
use crate::scanning::domain::{DependencyCount, DependencyStats, PackageRecord};
use crate::scanning::services::BomQueryEngine;
use crate::shared::Result;

/// QueryDependenciesUseCase - read-side queries over stored documents.
///
/// Pure reads, independent of any in-flight scan: the store hands over
/// whatever documents exist at call time, and the query engine
/// aggregates them. Safe to call mid-scan; the answer just reflects
/// the documents stored so far.
pub struct QueryDependenciesUseCase<DS> {
    store: Arc<DS>,
}

impl<DS> QueryDependenciesUseCase<DS>
where
    DS: DocumentStore,
{
    pub fn new(store: Arc<DS>) -> Self {
        Self { store }
    }

    /// The most common dependencies across all stored documents.
    pub fn top_dependencies(&self, limit: usize) -> Result<Vec<DependencyCount>> {
        let documents = self.store.all_documents()?;
        Ok(BomQueryEngine::top_dependencies(&documents, limit))
    }

    /// Corpus-wide dependency statistics.
    pub fn dependency_stats(&self) -> Result<DependencyStats> {
        let documents = self.store.all_documents()?;
        Ok(BomQueryEngine::dependency_stats(&documents))
    }

    /// All dependencies of one repository, in document order.
    pub fn dependencies_for_repo(&self, repo_key: &str) -> Result<Vec<PackageRecord>> {
        let documents = self.store.all_documents()?;
        Ok(BomQueryEngine::dependencies_for_repo(&documents, repo_key))
    }

    /// Repository keys with a stored document, sorted.
    pub fn repositories_with_documents(&self) -> Result<Vec<String>> {
        let documents = self.store.all_documents()?;
        Ok(BomQueryEngine::repositories_with_documents(&documents))
    }
}
