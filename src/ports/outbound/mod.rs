/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (forge API, storage, console).
pub mod document_store;
pub mod forge_client;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;

pub use document_store::DocumentStore;
pub use forge_client::ForgeClient;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
