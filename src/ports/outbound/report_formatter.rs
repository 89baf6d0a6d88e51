use crate::scanning::domain::{DependencyCount, DependencyStats};
use crate::shared::Result;

/// ReportFormatter port for rendering a top-dependencies ranking.
///
/// Formatters produce self-contained text; the summary statistics are
/// embedded where the format supports them.
pub trait ReportFormatter {
    fn format(&self, ranking: &[DependencyCount], stats: &DependencyStats) -> Result<String>;
}
