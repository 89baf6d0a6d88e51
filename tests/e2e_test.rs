/// End-to-end CLI tests (no network access required)
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sbomscan(db_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sbomscan").unwrap();
    cmd.arg("--database")
        .arg(db_dir.path().join("sbom_data.db"));
    cmd.current_dir(db_dir.path());
    cmd
}

#[test]
fn test_stats_on_empty_database() {
    let dir = TempDir::new().unwrap();
    sbomscan(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("SBOMs analyzed:"))
        .stdout(predicate::str::contains("0"));
}

#[test]
fn test_sessions_on_empty_database() {
    let dir = TempDir::new().unwrap();
    sbomscan(&dir)
        .arg("sessions")
        .assert()
        .success()
        .stdout(predicate::str::contains("No analysis sessions yet."));
}

#[test]
fn test_top_on_empty_database() {
    let dir = TempDir::new().unwrap();
    sbomscan(&dir)
        .arg("top")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run a scan first"));
}

#[test]
fn test_repo_without_document() {
    let dir = TempDir::new().unwrap();
    sbomscan(&dir)
        .arg("repo")
        .arg("acme/widgets")
        .assert()
        .success()
        .stdout(predicate::str::contains("No SBOM stored for acme/widgets"));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();
    sbomscan(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency Name,Occurrence Count"));
}

#[test]
fn test_export_html_to_file() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.html");
    sbomscan(&dir)
        .arg("export")
        .arg("--format")
        .arg("html")
        .arg("-o")
        .arg(&report)
        .assert()
        .success();

    let content = std::fs::read_to_string(report).unwrap();
    assert!(content.contains("<!DOCTYPE html>"));
    assert!(content.contains("Analysis Summary"));
}

#[test]
fn test_invalid_export_format_fails_with_usage_error() {
    let dir = TempDir::new().unwrap();
    sbomscan(&dir)
        .arg("export")
        .arg("--format")
        .arg("pdf")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_missing_subcommand_fails() {
    Command::cargo_bin("sbomscan")
        .unwrap()
        .assert()
        .failure()
        .code(2);
}
