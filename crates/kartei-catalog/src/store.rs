// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistent abstract catalogue backed by SQLite.
//
// The store holds the project records themselves plus a small key-value
// settings table (session label and the like).  Records survive process
// restarts; per-card UI state does not and is rebuilt from scratch by the
// app on every result set.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::collections::HashSet;

use tracing::{debug, info, instrument};

use kartei_core::error::{KarteiError, Result};
use kartei_core::types::{ProjectDraft, ProjectRecord, RecordId};

use crate::search::SearchQuery;

/// SQLite schema for the catalogue.
const CREATE_TABLES_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        year TEXT NOT NULL,
        abstract TEXT NOT NULL,
        supervisor TEXT NOT NULL,
        student TEXT NOT NULL,
        imported_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
"#;

/// Columns selected by every record query, in `row_to_record` order.
const RECORD_COLUMNS: &str = "id, title, year, abstract, supervisor, student, imported_at";

/// Persistent catalogue backed by a SQLite database.
///
/// All methods are synchronous because `rusqlite` does not support async
/// natively.  The app wraps the store in `Arc<Mutex<>>`; every operation
/// here is a sub-millisecond query.
pub struct CatalogStore {
    /// The open SQLite connection.
    conn: Connection,
}

impl CatalogStore {
    /// Open (or create) the catalogue database at the given path.
    ///
    /// Applies WAL journal mode and creates the tables if they do not
    /// exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| KarteiError::Database(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| KarteiError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| KarteiError::Database(format!("create tables: {e}")))?;

        info!("catalogue database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| KarteiError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| KarteiError::Database(format!("create tables: {e}")))?;

        debug!("in-memory catalogue database opened");
        Ok(Self { conn })
    }

    // -- Records -------------------------------------------------------------

    /// Insert a single record, returning its assigned id.
    #[instrument(skip_all, fields(title = %draft.title))]
    pub fn insert_record(&self, draft: &ProjectDraft) -> Result<RecordId> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO projects (title, year, abstract, supervisor, student, imported_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    draft.title,
                    draft.year,
                    draft.abstract_text,
                    draft.supervisor,
                    draft.student,
                    now,
                ],
            )
            .map_err(|e| KarteiError::Database(format!("insert record: {e}")))?;

        Ok(RecordId(self.conn.last_insert_rowid()))
    }

    /// Insert a batch of records inside one transaction.
    ///
    /// Returns the number inserted.  Either the whole batch lands or none
    /// of it does.
    #[instrument(skip_all, fields(count = drafts.len()))]
    pub fn insert_many(&mut self, drafts: &[ProjectDraft]) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| KarteiError::Database(format!("begin import: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO projects (title, year, abstract, supervisor, student, imported_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| KarteiError::Database(format!("prepare import: {e}")))?;

            let now = Utc::now().to_rfc3339();
            for draft in drafts {
                stmt.execute(params![
                    draft.title,
                    draft.year,
                    draft.abstract_text,
                    draft.supervisor,
                    draft.student,
                    now,
                ])
                .map_err(|e| KarteiError::Database(format!("insert record: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| KarteiError::Database(format!("commit import: {e}")))?;

        info!(count = drafts.len(), "records imported into catalogue");
        Ok(drafts.len())
    }

    /// Total number of records in the catalogue.
    pub fn record_count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as u64)
            .map_err(|e| KarteiError::Database(format!("count records: {e}")))
    }

    /// Every record, newest year first, titles alphabetical within a year.
    #[instrument(skip(self))]
    pub fn all_records(&self) -> Result<Vec<ProjectRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM projects ORDER BY year DESC, title ASC");
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| KarteiError::Database(format!("prepare all_records: {e}")))?;

        let records = stmt
            .query_map([], row_to_record)
            .map_err(|e| KarteiError::Database(format!("query all_records: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| KarteiError::Database(format!("collect rows: {e}")))?;

        debug!(count = records.len(), "retrieved all records");
        Ok(records)
    }

    /// Distinct years present in the catalogue, newest first.
    pub fn distinct_years(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT year FROM projects ORDER BY year DESC")
            .map_err(|e| KarteiError::Database(format!("prepare years: {e}")))?;

        stmt.query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| KarteiError::Database(format!("query years: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| KarteiError::Database(format!("collect years: {e}")))
    }

    /// Run a word search over titles and abstracts.
    ///
    /// Every query word must match (case-insensitive substring) in the
    /// title or the abstract; an optional year filter matches exactly.
    /// Duplicate rows are removed by (title, year, abstract) identity,
    /// keeping the first occurrence.  An unfiltered query returns the
    /// whole catalogue.
    #[instrument(skip_all, fields(words = query.words.len(), year = ?query.year))]
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<ProjectRecord>> {
        if query.is_unfiltered() {
            return self.all_records();
        }

        let (where_clause, params) = build_where(query);
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM projects WHERE {where_clause} ORDER BY year DESC, title ASC"
        );

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| KarteiError::Database(format!("prepare search: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), row_to_record)
            .map_err(|e| KarteiError::Database(format!("query search: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| KarteiError::Database(format!("collect rows: {e}")))?;

        // Imported files overlap between sessions; identical rows under
        // different ids collapse to the first one seen.
        let mut seen = HashSet::new();
        let records: Vec<ProjectRecord> = rows
            .into_iter()
            .filter(|r| seen.insert((r.title.clone(), r.year.clone(), r.abstract_text.clone())))
            .collect();

        debug!(count = records.len(), "search complete");
        Ok(records)
    }

    // -- Settings ------------------------------------------------------------

    /// Read a setting, falling back to `default` when absent.
    pub fn get_setting(&self, key: &str, default: &str) -> Result<String> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1")
            .map_err(|e| KarteiError::Database(format!("prepare get_setting: {e}")))?;

        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .map_err(|e| KarteiError::Database(format!("query get_setting: {e}")))?;

        match rows.next() {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => Err(KarteiError::Database(format!("row parse: {e}"))),
            None => Ok(default.to_string()),
        }
    }

    /// Write a setting, inserting or overwriting as needed.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| KarteiError::Database(format!("set_setting: {e}")))?;

        debug!(key, "setting stored");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SQL construction and row mapping
// ---------------------------------------------------------------------------

/// Build the WHERE clause and its parameters for a search query.
///
/// One `(title LIKE ? OR abstract LIKE ?)` group per word, AND-joined,
/// with an exact year comparison appended when a filter is set.
fn build_where(query: &SearchQuery) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    for word in &query.words {
        clauses.push("(title LIKE ? OR abstract LIKE ?)");
        let pattern = format!("%{word}%");
        params.push(pattern.clone());
        params.push(pattern);
    }

    let mut where_clause = if clauses.is_empty() {
        "1=1".to_string()
    } else {
        clauses.join(" AND ")
    };

    if let Some(ref year) = query.year {
        where_clause = format!("({where_clause}) AND year = ?");
        params.push(year.clone());
    }

    (where_clause, params)
}

/// Map a SQLite row to a `ProjectRecord`.
///
/// Column indices must match `RECORD_COLUMNS`.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRecord> {
    let imported_at_str: String = row.get(6)?;
    let imported_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&imported_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(ProjectRecord {
        id: RecordId(row.get(0)?),
        title: row.get(1)?,
        year: row.get(2)?,
        abstract_text: row.get(3)?,
        supervisor: row.get(4)?,
        student: row.get(5)?,
        imported_at,
    })
}
