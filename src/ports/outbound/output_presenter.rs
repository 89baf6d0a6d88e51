use crate::shared::Result;

/// OutputPresenter port for delivering an exported report.
///
/// Implementations decide the destination (stdout, a file); the
/// formatting layer only produces the text.
pub trait OutputPresenter {
    fn present(&self, content: &str) -> Result<()>;
}
