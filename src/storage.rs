//! Storage layer: the SQLite `tasks` table.

use crate::store::StoreError;
use crate::types::{ParseStatusError, Status, Task, ValidationError};
use chrono::{DateTime, NaiveDateTime, Utc};
use eyre::{Context, Result};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::{Path, PathBuf};

/// Format used for the `created` column. Existing data files use it too.
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f%:z";

const SELECT_COLUMNS: &str = "SELECT id, name, project, status, created FROM tasks";

/// Storage handle over one SQLite database file.
pub struct Storage {
    path: PathBuf,
    db: Connection,
}

impl Storage {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Connection::open(path).context("Failed to open SQLite database")?;

        let storage = Self {
            path: path.to_path_buf(),
            db,
        };
        storage.init_schema()?;

        debug!("db setup: {}", storage.table_exists());
        Ok(storage)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the connection, reporting any failure.
    pub fn close(self) -> Result<()> {
        self.db
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close SQLite database")
    }

    /// Initialize SQLite schema.
    fn init_schema(&self) -> Result<()> {
        self.db
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL CHECK (name <> ''),
                    project TEXT,
                    status TEXT,
                    created DATETIME
                );
            "#,
            )
            .context("Failed to initialize schema")?;

        Ok(())
    }

    /// Whether the `tasks` table is present.
    pub fn table_exists(&self) -> bool {
        self.db
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'tasks'",
                [],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Insert a new row and return its id.
    pub fn insert_task(&self, name: &str, project: &str, status: Status, created: DateTime<Utc>) -> Result<u64> {
        self.db
            .execute(
                "INSERT INTO tasks (name, project, status, created) VALUES (?, ?, ?, ?)",
                params![name, project, status.as_str(), encode_created(created)],
            )
            .map_err(map_constraint)
            .context("Failed to insert task")?;

        let id = u64::try_from(self.db.last_insert_rowid()).context("Invalid row id")?;
        Ok(id)
    }

    /// Get a task by ID.
    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let task = self
            .db
            .query_row(&sql, params![id], Self::row_to_task)
            .optional()
            .context("Failed to query task")?;

        Ok(task)
    }

    /// All tasks in id order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!("{} ORDER BY id ASC", SELECT_COLUMNS);
        self.query_tasks(&sql, params![])
    }

    /// Tasks whose status equals `status`, in id order.
    pub fn list_tasks_by_status(&self, status: Status) -> Result<Vec<Task>> {
        let sql = format!("{} WHERE status = ? ORDER BY id ASC", SELECT_COLUMNS);
        self.query_tasks(&sql, params![status.as_str()])
    }

    /// Tasks whose project contains `project`, in id order.
    ///
    /// `instr` keeps the match case-sensitive, unlike `LIKE`.
    pub fn list_tasks_by_project(&self, project: &str) -> Result<Vec<Task>> {
        let sql = format!(
            "{} WHERE instr(COALESCE(project, ''), ?) > 0 ORDER BY id ASC",
            SELECT_COLUMNS
        );
        self.query_tasks(&sql, params![project])
    }

    /// Overwrite the mutable columns of an existing row.
    ///
    /// Returns the number of rows changed.
    pub fn update_task(&self, task: &Task) -> Result<usize> {
        let changed = self
            .db
            .execute(
                "UPDATE tasks SET name = ?, project = ?, status = ? WHERE id = ?",
                params![task.name, task.project, task.status.as_str(), row_id(task.id)?],
            )
            .map_err(map_constraint)
            .context("Failed to update task")?;

        Ok(changed)
    }

    /// Remove a row. Returns the number of rows deleted.
    pub fn delete_task(&self, id: u64) -> Result<usize> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(0);
        };
        let deleted = self
            .db
            .execute("DELETE FROM tasks WHERE id = ?", params![id])
            .context("Failed to delete task")?;

        Ok(deleted)
    }

    fn query_tasks(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Task>> {
        let mut stmt = self.db.prepare(sql)?;
        let tasks = stmt
            .query_map(params, Self::row_to_task)?
            .collect::<rusqlite::Result<Vec<Task>>>()
            .context("Failed to read tasks")?;

        Ok(tasks)
    }

    /// Convert a database row to a Task.
    fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status_str: Option<String> = row.get(3)?;
        let status = match status_str.as_deref() {
            Some(s) => Status::from_stored(s).ok_or_else(|| {
                let err = ParseStatusError(s.to_string());
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err))
            })?,
            None => Status::Todo,
        };

        // NULL created reads as the Unix epoch
        let created_str: Option<String> = row.get(4)?;
        let created = match created_str {
            Some(s) => decode_created(&s)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
            None => DateTime::UNIX_EPOCH,
        };

        let id: i64 = row.get(0)?;
        let id = u64::try_from(id)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e)))?;

        Ok(Task {
            id,
            name: row.get(1)?,
            project: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            status,
            created,
        })
    }
}

/// SQLite rowids are signed.
fn row_id(id: u64) -> Result<i64> {
    i64::try_from(id).with_context(|| format!("Task id {} out of range", id))
}

/// Report constraint failures as validation errors; pass the rest through.
fn map_constraint(err: rusqlite::Error) -> eyre::Report {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            let detail = msg.unwrap_or_else(|| e.to_string());
            eyre::eyre!(StoreError::Validation(ValidationError::Constraint(detail)))
        }
        other => eyre::Report::new(other),
    }
}

fn encode_created(created: DateTime<Utc>) -> String {
    created.format(CREATED_FORMAT).to_string()
}

/// Parse a stored `created` value.
///
/// Accepts the native format, RFC 3339, and a bare datetime taken as UTC.
fn decode_created(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z")
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.and_utc()))
}
