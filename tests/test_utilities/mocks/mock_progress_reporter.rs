use sbomscan::prelude::*;
use std::sync::Mutex;

/// Mock ProgressReporter that records every message for assertions.
pub struct MockProgressReporter {
    pub messages: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Default for MockProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.messages.lock().unwrap().push(format!(
            "progress {}/{} {}",
            current,
            total,
            message.unwrap_or("")
        ));
    }

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
