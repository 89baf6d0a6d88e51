use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::outbound::formatters::{CsvFormatter, HtmlFormatter};
use crate::ports::outbound::ReportFormatter;

#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Csv,
    Html,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "html" => Ok(ExportFormat::Html),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'csv' or 'html'",
                s
            )),
        }
    }
}

impl ExportFormat {
    /// Creates a formatter instance for the specified export format
    pub fn create_formatter(&self) -> Box<dyn ReportFormatter> {
        match self {
            ExportFormat::Csv => Box::new(CsvFormatter::new()),
            ExportFormat::Html => Box::new(HtmlFormatter::new()),
        }
    }
}

/// Inventory dependency SBOMs across a GitHub organization
#[derive(Parser, Debug)]
#[command(name = "sbomscan")]
#[command(version)]
#[command(about = "Fetch and analyze dependency SBOMs for every repository of an organization", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database (defaults to sbom_data.db)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Path to a config file (defaults to ./sbomscan.config.yml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan an organization: fetch and store the SBOM of every public repository
    Scan {
        /// Name of the organization to scan
        org: String,
    },
    /// Show database statistics, recent sessions, and the current API quota
    Status,
    /// Show the most common dependencies across all stored SBOMs
    Top {
        /// Maximum number of dependencies to show
        #[arg(short = 'n', long, default_value_t = 50)]
        limit: usize,
    },
    /// Show corpus-wide dependency statistics
    Stats,
    /// Show all dependencies of one repository
    Repo {
        /// Repository key in owner/name form
        repo_key: String,
    },
    /// List repositories with a stored SBOM
    Repos,
    /// Export the top-dependency ranking as CSV or a self-contained HTML report
    Export {
        /// Export format: csv or html
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of dependencies to export
        #[arg(short = 'n', long, default_value_t = 100)]
        limit: usize,
    },
    /// List recent analysis sessions
    Sessions {
        /// Maximum number of sessions to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_export_format_from_str() {
        assert!(matches!(
            ExportFormat::from_str("csv").unwrap(),
            ExportFormat::Csv
        ));
        assert!(matches!(
            ExportFormat::from_str("CSV").unwrap(),
            ExportFormat::Csv
        ));
        assert!(matches!(
            ExportFormat::from_str("html").unwrap(),
            ExportFormat::Html
        ));
        assert!(matches!(
            ExportFormat::from_str("Html").unwrap(),
            ExportFormat::Html
        ));
    }

    #[test]
    fn test_export_format_from_str_invalid() {
        let error = ExportFormat::from_str("pdf").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("csv"));
        assert!(error.contains("html"));
    }

    #[test]
    fn test_cli_parses_scan() {
        let cli = Cli::try_parse_from(["sbomscan", "scan", "acme"]).unwrap();
        match cli.command {
            Command::Scan { org } => assert_eq!(org, "acme"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_export_with_options() {
        let cli = Cli::try_parse_from([
            "sbomscan", "export", "--format", "html", "-o", "report.html", "-n", "25",
        ])
        .unwrap();
        match cli.command {
            Command::Export {
                format,
                output,
                limit,
            } => {
                assert!(matches!(format, ExportFormat::Html));
                assert_eq!(output, Some(PathBuf::from("report.html")));
                assert_eq!(limit, 25);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["sbomscan"]).is_err());
    }

    #[test]
    fn test_cli_global_database_flag() {
        let cli = Cli::try_parse_from(["sbomscan", "--database", "/tmp/x.db", "stats"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
    }
}
