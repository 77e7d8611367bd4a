//! Tasks: a personal task tracker backed by a local SQLite file.
//!
//! Each task has a name, an optional project, a status and a creation time.
//! Updates are partial: only the fields supplied in a [`TaskPatch`] change.
//!
//! # Example
//!
//! ```no_run
//! use tasks::{Filter, Status, Store, TaskPatch};
//! use std::path::Path;
//!
//! let mut store = Store::open_in(Path::new("/tmp/tasks")).unwrap();
//!
//! let task = store.add("get milk", "groceries").unwrap();
//! assert_eq!(task.status, Status::Todo);
//!
//! store.update(&TaskPatch::new(task.id).status(Status::InProgress)).unwrap();
//!
//! let active = store.list(&Filter::Status(Status::InProgress)).unwrap();
//! assert_eq!(active.len(), 1);
//!
//! store.delete(task.id).unwrap();
//! store.close().unwrap();
//! ```

mod storage;
mod store;
mod types;

pub mod config;
pub mod query;
pub mod view;

// Re-export public API
pub use config::Config;
pub use query::Filter;
pub use store::{DB_FILE, Store, StoreError};
pub use types::{ParseStatusError, Status, Task, TaskPatch, ValidationError};
