mod mock_forge_client;
mod mock_progress_reporter;

pub use mock_forge_client::{BomOutcome, MockForgeClient};
pub use mock_progress_reporter::MockProgressReporter;
