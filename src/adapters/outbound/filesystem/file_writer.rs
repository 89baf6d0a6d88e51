use anyhow::Context;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::ports::outbound::OutputPresenter;
use crate::shared::Result;

/// FileSystemWriter adapter for writing an exported report to a file.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Validates the destination before writing: the parent directory
    /// must exist and the target must not be a symlink.
    fn validate_output_path(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.exists() && parent != Path::new("") {
                anyhow::bail!(
                    "Parent directory does not exist: {}",
                    parent.display()
                );
            }
        }

        if self.output_path.exists() {
            let metadata = fs::symlink_metadata(&self.output_path).with_context(|| {
                format!(
                    "Failed to read metadata for: {}",
                    self.output_path.display()
                )
            })?;
            if metadata.is_symlink() {
                anyhow::bail!(
                    "Security: refusing to write through symbolic link: {}",
                    self.output_path.display()
                );
            }
        }

        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_output_path()?;
        fs::write(&self.output_path, content).with_context(|| {
            format!("Failed to write report to: {}", self.output_path.display())
        })?;
        Ok(())
    }
}

/// StdoutPresenter adapter for printing an exported report to stdout.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context("Failed to write report to stdout")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        let writer = FileSystemWriter::new(path.clone());

        writer.present("Dependency Name,Occurrence Count\n").unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Dependency Name"));
    }

    #[test]
    fn test_missing_parent_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.csv");
        let writer = FileSystemWriter::new(path);

        let result = writer.present("content");
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Parent directory"));
    }

    #[test]
    fn test_overwrite_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "old").unwrap();

        let writer = FileSystemWriter::new(path.clone());
        writer.present("new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_stdout_presenter_does_not_fail() {
        let presenter = StdoutPresenter::new();
        assert!(presenter.present("hello\n").is_ok());
    }
}
