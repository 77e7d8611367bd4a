//! Core data types for the task tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Store-assigned, monotonically increasing
    pub id: u64,

    /// What needs doing
    pub name: String,

    /// Free-form project; empty means none
    pub project: String,

    /// Current state
    pub status: Status,

    /// When created, never modified afterwards
    pub created: DateTime<Utc>,
}

/// Task status states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl Status {
    /// Every status, in index order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// The form persisted in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in progress",
            Status::Done => "done",
        }
    }

    /// Exact inverse of [`Status::as_str`], used when reading rows.
    pub fn from_stored(s: &str) -> Option<Status> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Position within [`Status::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known status.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status '{}': expected todo, in progress, done (or 0, 1, 2)",
            self.0
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "todo" => Ok(Status::Todo),
            "in progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(Status::from_index)
                .ok_or_else(|| ParseStatusError(s.to_string())),
        }
    }
}

/// Fields to change on an existing task.
///
/// `None` leaves the stored value alone; `Some` overwrites it, including
/// `Some(String::new())` for the project and `Some(Status::Todo)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub id: u64,
    pub name: Option<String>,
    pub project: Option<String>,
    pub status: Option<Status>,
}

impl TaskPatch {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.project.is_none() && self.status.is_none()
    }

    /// Check the supplied fields only; absent fields are never judged.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_deref() == Some("") {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    /// Merge supplied fields over `existing`. `id` and `created` are kept.
    pub fn apply(&self, existing: Task) -> Task {
        Task {
            id: existing.id,
            name: self.name.clone().unwrap_or(existing.name),
            project: self.project.clone().unwrap_or(existing.project),
            status: self.status.unwrap_or(existing.status),
            created: existing.created,
        }
    }
}

/// Validation errors for tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    /// Rejected by a database constraint
    Constraint(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "task name cannot be empty"),
            ValidationError::Constraint(msg) => write!(f, "constraint violated: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl Task {
    /// Validate the task's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}
