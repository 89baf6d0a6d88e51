mod bom_query;
mod document_path;

pub use bom_query::BomQueryEngine;
pub use document_path::{extract, string_field, PathStep};
