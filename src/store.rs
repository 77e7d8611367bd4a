//! High-level store API for tasks.

use crate::query::Filter;
use crate::storage::Storage;
use crate::types::{Status, Task, TaskPatch, ValidationError};
use chrono::Utc;
use eyre::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Database file name inside a data directory.
pub const DB_FILE: &str = "tasks.db";

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The database or its directory could not be created or opened.
    StorageUnavailable(String),
    /// A field failed validation or a schema constraint.
    Validation(ValidationError),
    /// No task with this id.
    NotFound(u64),
    /// Status and project filters were both requested.
    ConflictingFilter,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageUnavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
            StoreError::NotFound(id) => write!(f, "task not found: {}", id),
            StoreError::ConflictingFilter => write!(f, "can only filter by project or status, not both"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The task store.
///
/// Each handle owns one SQLite connection. Dropping the handle releases it;
/// [`Store::close`] does the same but reports failures.
///
/// There is no cross-process locking beyond SQLite's own, so two
/// invocations racing on the same file may interleave.
pub struct Store {
    storage: Storage,
}

impl Store {
    /// Open the database at `path`, creating its directory and the `tasks`
    /// table when missing.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                eyre::eyre!(StoreError::StorageUnavailable(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let storage = Storage::open(path).map_err(|e| {
            eyre::eyre!(StoreError::StorageUnavailable(format!(
                "cannot open {}: {:#}",
                path.display(),
                e
            )))
        })?;

        debug!("Opened task store at {}", path.display());
        Ok(Self { storage })
    }

    /// Open `tasks.db` inside `dir`.
    pub fn open_in(dir: &Path) -> Result<Self> {
        Self::open(&dir.join(DB_FILE))
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Release the connection.
    pub fn close(self) -> Result<()> {
        self.storage
            .close()
            .map_err(|e| eyre::eyre!(StoreError::StorageUnavailable(format!("{:#}", e))))
    }

    /// Create a new task with status `todo`.
    pub fn add(&mut self, name: &str, project: &str) -> Result<Task> {
        let now = Utc::now();

        let mut task = Task {
            id: 0,
            name: name.to_string(),
            project: project.to_string(),
            status: Status::Todo,
            created: now,
        };

        // Validate before persisting
        task.validate().map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        task.id = self
            .storage
            .insert_task(&task.name, &task.project, task.status, task.created)
            .context("Failed to persist task")?;

        info!("Added task {}: {}", task.id, task.name);
        Ok(task)
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Result<Task> {
        self.storage
            .get_task(id)?
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))
    }

    /// All tasks in insertion order.
    pub fn all(&self) -> Result<Vec<Task>> {
        self.storage.list_tasks()
    }

    /// Tasks with exactly this status.
    pub fn by_status(&self, status: Status) -> Result<Vec<Task>> {
        self.storage.list_tasks_by_status(status)
    }

    /// Tasks whose project contains `project` (case-sensitive).
    pub fn by_project(&self, project: &str) -> Result<Vec<Task>> {
        self.storage.list_tasks_by_project(project)
    }

    /// List tasks matching a filter.
    pub fn list(&self, filter: &Filter) -> Result<Vec<Task>> {
        match filter {
            Filter::All => self.all(),
            Filter::Status(status) => self.by_status(*status),
            Filter::Project(project) => self.by_project(project),
        }
    }

    /// Apply the supplied fields of `patch` to the stored task.
    pub fn update(&mut self, patch: &TaskPatch) -> Result<Task> {
        // Only supplied fields are checked; rows from older files may hold
        // values the current rules reject.
        patch.validate().map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        let existing = self.get(patch.id)?;
        let updated = patch.apply(existing);

        let changed = self
            .storage
            .update_task(&updated)
            .context("Failed to persist updated task")?;
        if changed == 0 {
            return Err(eyre::eyre!(StoreError::NotFound(patch.id)));
        }

        info!("Updated task {}", updated.id);
        Ok(updated)
    }

    /// Permanently remove a task.
    ///
    /// Unknown ids are not an error; returns whether a row was removed.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let deleted = self.storage.delete_task(id).context("Failed to delete task")?;
        if deleted > 0 {
            info!("Deleted task {}", id);
        } else {
            debug!("Delete of unknown task {} ignored", id);
        }
        Ok(deleted > 0)
    }
}
