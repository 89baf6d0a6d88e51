mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod scanning;
mod shared;

use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use adapters::outbound::network::GitHubForgeClient;
use adapters::outbound::storage::SqliteDocumentStore;
use application::dto::ScanRequest;
use application::progress::ProgressRegistry;
use application::use_cases::{QueryDependenciesUseCase, ScanOrganizationUseCase};
use cli::{Cli, Command};
use config::Settings;
use ports::outbound::{DocumentStore, ForgeClient, OutputPresenter};
use scanning::domain::AnalysisSession;
use shared::error::ExitCode;
use shared::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse_args();

    let config_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::resolve(config_file, args.database.clone());

    let store = Arc::new(SqliteDocumentStore::open(&settings.database)?);

    match args.command {
        Command::Scan { org } => run_scan(&settings, store, org).await,
        Command::Status => show_status(&settings, store).await,
        Command::Top { limit } => show_top(store, limit),
        Command::Stats => show_stats(store),
        Command::Repo { repo_key } => show_repo(store, &repo_key),
        Command::Repos => show_repos(store),
        Command::Export {
            format,
            output,
            limit,
        } => export_report(store, format, output, limit),
        Command::Sessions { limit } => show_sessions(store, limit),
    }
}

async fn run_scan(
    settings: &Settings,
    store: Arc<SqliteDocumentStore>,
    org: String,
) -> Result<()> {
    let forge = Arc::new(GitHubForgeClient::with_base_url(
        settings.api_url.clone(),
        settings.token.clone(),
    )?);
    if settings.token.is_none() {
        eprintln!(
            "{}",
            "⚠️  No GITHUB_TOKEN set. Using unauthenticated requests (60 requests/hour)".yellow()
        );
    }

    let reporter = Arc::new(StderrProgressReporter::new());
    let registry = ProgressRegistry::new();
    let use_case =
        ScanOrganizationUseCase::new(forge, Arc::clone(&store), reporter, registry.clone());

    let handle = use_case.start(ScanRequest::new(org)).await?;
    let session_id = handle.session_id;
    println!("session {}", session_id);

    handle
        .join
        .await
        .map_err(|e| anyhow::anyhow!("Scan task failed: {}", e))?;

    if let Some(progress) = registry.snapshot(session_id) {
        if !progress.errors.is_empty() {
            eprintln!(
                "{}",
                format!("⚠️  {} repositories had errors:", progress.errors.len()).yellow()
            );
            for error in &progress.errors {
                eprintln!("   {}", error);
            }
        }
    }

    Ok(())
}

async fn show_status(settings: &Settings, store: Arc<SqliteDocumentStore>) -> Result<()> {
    let document_count = store.document_count()?;
    println!("{}", "📊 sbomscan status".bold());
    println!("   Stored SBOMs: {}", document_count);

    if document_count > 0 {
        let queries = QueryDependenciesUseCase::new(Arc::clone(&store));
        let stats = queries.dependency_stats()?;
        println!("   Unique dependencies: {}", stats.unique_dependencies);
        println!("   Total occurrences: {}", stats.total_occurrences);
    }

    let sessions = store.recent_sessions(5)?;
    if !sessions.is_empty() {
        println!("\n{}", "Recent sessions:".bold());
        for session in &sessions {
            println!("   {}", format_session(session));
        }
    }

    let forge = GitHubForgeClient::with_base_url(settings.api_url.clone(), settings.token.clone())?;
    let quota = forge.quota_state().await;
    println!("\n{}", "API quota:".bold());
    match (quota.limit, quota.remaining, quota.reset_epoch) {
        (Some(limit), Some(remaining), Some(reset)) => {
            println!(
                "   {} of {} requests remaining (resets at epoch {})",
                remaining, limit, reset
            );
            println!(
                "   Authenticated: {}",
                if quota.authenticated { "yes" } else { "no" }
            );
        }
        _ => println!("   {}", "Unknown (could not reach the API)".yellow()),
    }

    Ok(())
}

fn show_top(store: Arc<SqliteDocumentStore>, limit: usize) -> Result<()> {
    let queries = QueryDependenciesUseCase::new(store);
    let ranking = queries.top_dependencies(limit)?;
    if ranking.is_empty() {
        println!("No dependencies stored yet. Run a scan first.");
        return Ok(());
    }
    for (rank, entry) in ranking.iter().enumerate() {
        println!("{:>4}. {} ({})", rank + 1, entry.identity, entry.count);
    }
    Ok(())
}

fn show_stats(store: Arc<SqliteDocumentStore>) -> Result<()> {
    let queries = QueryDependenciesUseCase::new(store);
    let stats = queries.dependency_stats()?;
    println!("SBOMs analyzed:         {}", stats.sbom_count);
    println!("Unique dependencies:    {}", stats.unique_dependencies);
    println!("Total occurrences:      {}", stats.total_occurrences);
    Ok(())
}

fn show_repo(store: Arc<SqliteDocumentStore>, repo_key: &str) -> Result<()> {
    let queries = QueryDependenciesUseCase::new(store);
    let records = queries.dependencies_for_repo(repo_key)?;
    if records.is_empty() {
        println!("No SBOM stored for {}", repo_key);
        return Ok(());
    }
    println!("{} dependencies of {}:", records.len(), repo_key);
    for record in &records {
        println!(
            "   {} {} {} {}",
            record.identity,
            record.name.as_deref().unwrap_or("-"),
            record.version.as_deref().unwrap_or("-"),
            record.license.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn show_repos(store: Arc<SqliteDocumentStore>) -> Result<()> {
    let queries = QueryDependenciesUseCase::new(store);
    for repo_key in queries.repositories_with_documents()? {
        println!("{}", repo_key);
    }
    Ok(())
}

fn export_report(
    store: Arc<SqliteDocumentStore>,
    format: cli::ExportFormat,
    output: Option<PathBuf>,
    limit: usize,
) -> Result<()> {
    let queries = QueryDependenciesUseCase::new(store);
    let ranking = queries.top_dependencies(limit)?;
    let stats = queries.dependency_stats()?;

    let formatter = format.create_formatter();
    let content = formatter.format(&ranking, &stats)?;

    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&content)?;
    Ok(())
}

fn show_sessions(store: Arc<SqliteDocumentStore>, limit: usize) -> Result<()> {
    let sessions = store.recent_sessions(limit)?;
    if sessions.is_empty() {
        println!("No analysis sessions yet.");
        return Ok(());
    }
    for session in &sessions {
        println!("{}", format_session(session));
    }
    Ok(())
}

fn format_session(session: &AnalysisSession) -> String {
    format!(
        "#{} {} {}/{} [{}] started {}",
        session.id,
        session.org_name,
        session.processed_repos,
        session.total_repos,
        session.status,
        session.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanning::domain::SessionStatus;

    #[test]
    fn test_format_session() {
        let session = AnalysisSession {
            id: 3,
            org_name: "acme".to_string(),
            total_repos: 10,
            processed_repos: 7,
            status: SessionStatus::Processing,
            created_at: chrono::Utc::now(),
            completed_at: None,
        };
        let line = format_session(&session);
        assert!(line.starts_with("#3 acme 7/10 [processing]"));
    }
}
