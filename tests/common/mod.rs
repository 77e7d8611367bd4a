//! Shared test infrastructure for tasks integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use tasks::{Status, Store, StoreError, Task, TaskPatch};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: Store,
}

impl TestEnv {
    /// Create a new test environment with an opened store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open_in(temp_dir.path()).expect("Failed to open store");
        Self { temp_dir, store }
    }

    /// Add a task.
    pub fn add(&mut self, name: &str, project: &str) -> Task {
        self.store.add(name, project).expect("Failed to add task")
    }

    /// Add a task and move it to `status`.
    pub fn add_with_status(&mut self, name: &str, project: &str, status: Status) -> Task {
        let task = self.add(name, project);
        self.store
            .update(&TaskPatch::new(task.id).status(status))
            .expect("Failed to set status")
    }

    /// Close the store and open the same file again.
    pub fn reopen(self) -> Self {
        let TestEnv { temp_dir, store } = self;
        store.close().expect("Failed to close store");
        let store = Store::open_in(temp_dir.path()).expect("Failed to reopen store");
        Self { temp_dir, store }
    }

    /// Names of tasks, in order.
    pub fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    /// Get all tasks count.
    pub fn total_count(&self) -> usize {
        self.store.all().expect("Failed to list tasks").len()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the store error carried by a report.
pub fn store_error(report: &eyre::Report) -> &StoreError {
    report
        .downcast_ref::<StoreError>()
        .unwrap_or_else(|| panic!("expected a StoreError, got: {:#}", report))
}
