/// ProgressReporter port for user feedback during a running scan.
///
/// Abstracts where progress goes (stderr, a test buffer) so the scan
/// driver stays independent of the console.
pub trait ProgressReporter {
    /// Reports a plain progress message.
    fn report(&self, message: &str);

    /// Reports positional progress against a known total.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning without interrupting the operation.
    fn report_error(&self, message: &str);

    /// Reports completion of the whole operation.
    fn report_completion(&self, message: &str);
}
