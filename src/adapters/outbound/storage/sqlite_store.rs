use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;

use crate::ports::outbound::DocumentStore;
use crate::scanning::domain::{AnalysisSession, SessionStatus};
use crate::shared::Result;

/// Timestamp format SQLite's CURRENT_TIMESTAMP emits.
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SqliteDocumentStore adapter for the BOM and session tables.
///
/// Implements the DocumentStore port over a single SQLite database.
/// Documents are stored as serialized JSON keyed uniquely by the
/// repository's full name; sessions get auto-incrementing ids.
/// The connection is guarded by a mutex so the store can be shared
/// between a running scan task and concurrent query readers.
pub struct SqliteDocumentStore {
    conn: Mutex<Connection>,
}

impl SqliteDocumentStore {
    /// Opens (creating if necessary) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).with_context(|| {
            format!("Failed to open database: {}", path.as_ref().display())
        })?;
        Self::from_connection(conn)
    }

    /// An in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sbom (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_repo TEXT UNIQUE NOT NULL,
                json_content TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS analysis_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                org_name TEXT NOT NULL,
                total_repos INTEGER NOT NULL,
                processed_repos INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                completed_at TIMESTAMP
            );
            "#,
        )
        .context("Failed to initialize database schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    fn session_from_row(row: &Row<'_>) -> rusqlite::Result<AnalysisSession> {
        let status_raw: String = row.get(4)?;
        let created_raw: String = row.get(5)?;
        let completed_raw: Option<String> = row.get(6)?;
        Ok(AnalysisSession {
            id: row.get(0)?,
            org_name: row.get(1)?,
            total_repos: row.get::<_, i64>(2)? as usize,
            processed_repos: row.get::<_, i64>(3)? as usize,
            status: status_raw.parse().unwrap_or(SessionStatus::Pending),
            created_at: Self::parse_timestamp(&created_raw).unwrap_or_else(Utc::now),
            completed_at: completed_raw.as_deref().and_then(Self::parse_timestamp),
        })
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn put_document(&self, repo_key: &str, document: &Value) -> Result<()> {
        let json_content = serde_json::to_string(document)
            .with_context(|| format!("Failed to serialize BOM document for {}", repo_key))?;
        let conn = self.conn.lock().expect("document store mutex poisoned");
        conn.execute(
            "INSERT INTO sbom (source_repo, json_content) VALUES (?1, ?2)
             ON CONFLICT(source_repo) DO UPDATE SET json_content = excluded.json_content",
            params![repo_key, json_content],
        )
        .with_context(|| format!("Failed to store BOM document for {}", repo_key))?;
        Ok(())
    }

    fn document_count(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("document store mutex poisoned");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM sbom", [], |row| row.get(0))
            .context("Failed to count BOM documents")?;
        Ok(count as usize)
    }

    fn all_documents(&self) -> Result<Vec<(String, Value)>> {
        let conn = self.conn.lock().expect("document store mutex poisoned");
        let mut stmt = conn
            .prepare("SELECT source_repo, json_content FROM sbom ORDER BY id")
            .context("Failed to prepare document query")?;
        let rows = stmt
            .query_map([], |row| {
                let key: String = row.get(0)?;
                let json_content: String = row.get(1)?;
                Ok((key, json_content))
            })
            .context("Failed to query BOM documents")?;

        let mut documents = Vec::new();
        for row in rows {
            let (key, json_content) = row.context("Failed to read BOM document row")?;
            let document: Value = serde_json::from_str(&json_content)
                .with_context(|| format!("Stored BOM document for {} is not valid JSON", key))?;
            documents.push((key, document));
        }
        Ok(documents)
    }

    fn create_session(&self, org_name: &str, total_repos: usize) -> Result<i64> {
        let conn = self.conn.lock().expect("document store mutex poisoned");
        conn.execute(
            "INSERT INTO analysis_sessions (org_name, total_repos, processed_repos)
             VALUES (?1, ?2, 0)",
            params![org_name, total_repos as i64],
        )
        .with_context(|| format!("Failed to create analysis session for {}", org_name))?;
        Ok(conn.last_insert_rowid())
    }

    fn update_session(&self, id: i64, processed: usize, status: SessionStatus) -> Result<()> {
        let conn = self.conn.lock().expect("document store mutex poisoned");
        // Monotonic by construction: the processed count can only grow
        // (capped at the total), a completed status sticks, and
        // completed_at is stamped exactly once.
        conn.execute(
            "UPDATE analysis_sessions SET
                processed_repos = MIN(total_repos, MAX(processed_repos, ?2)),
                status = CASE WHEN status = 'completed' THEN status ELSE ?3 END,
                completed_at = CASE
                    WHEN ?3 = 'completed' AND completed_at IS NULL THEN CURRENT_TIMESTAMP
                    ELSE completed_at
                END
             WHERE id = ?1",
            params![id, processed as i64, status.as_str()],
        )
        .with_context(|| format!("Failed to update analysis session {}", id))?;
        Ok(())
    }

    fn session(&self, id: i64) -> Result<Option<AnalysisSession>> {
        let conn = self.conn.lock().expect("document store mutex poisoned");
        conn.query_row(
            "SELECT id, org_name, total_repos, processed_repos, status, created_at, completed_at
             FROM analysis_sessions WHERE id = ?1",
            params![id],
            Self::session_from_row,
        )
        .optional()
        .with_context(|| format!("Failed to load analysis session {}", id))
    }

    fn recent_sessions(&self, limit: usize) -> Result<Vec<AnalysisSession>> {
        let conn = self.conn.lock().expect("document store mutex poisoned");
        let mut stmt = conn
            .prepare(
                "SELECT id, org_name, total_repos, processed_repos, status, created_at, completed_at
                 FROM analysis_sessions ORDER BY id DESC LIMIT ?1",
            )
            .context("Failed to prepare session query")?;
        let rows = stmt
            .query_map(params![limit as i64], Self::session_from_row)
            .context("Failed to query analysis sessions")?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.context("Failed to read analysis session row")?);
        }
        Ok(sessions)
    }
}
