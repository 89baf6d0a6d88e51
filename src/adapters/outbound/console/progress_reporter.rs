use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;

use crate::ports::outbound::ProgressReporter;

/// StderrProgressReporter adapter for reporting scan progress to stderr.
///
/// Implements the ProgressReporter port, writing progress to stderr so
/// it doesn't interfere with stdout output. Uses indicatif for the
/// per-repository progress bar. The bar is behind a mutex because the
/// scan driver polls progress from an async context.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.lock().expect("progress bar mutex poisoned");
        if let Some(pb) = pb_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}",
                    )
                    .expect("Failed to set progress bar template")
                    .progress_chars("=>-"),
            );
            *pb_option = Some(pb.clone());
            pb
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self
            .progress_bar
            .lock()
            .expect("progress bar mutex poisoned")
            .as_ref()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        // Warnings and per-repository errors are normal mid-scan events;
        // print them above the bar and keep it running.
        let guard = self
            .progress_bar
            .lock()
            .expect("progress bar mutex poisoned");
        match guard.as_ref() {
            Some(pb) if !pb.is_finished() => pb.println(format!("{}", message.yellow())),
            _ => eprintln!("{}", message.yellow()),
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_bar();
        eprintln!();
        eprintln!("{}", message.green());
    }
}
