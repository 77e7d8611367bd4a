//! Integration tests for error handling.
//!
//! Tests that errors are properly returned for invalid operations.

mod common;

use common::{TestEnv, store_error};
use std::fs;
use tasks::{Filter, Status, Store, StoreError, TaskPatch, ValidationError};
use tempfile::TempDir;

// =============================================================================
// Not Found Tests
// =============================================================================

#[test]
fn test_get_nonexistent_task_fails() {
    let env = TestEnv::new();

    let err = env.store.get(42).unwrap_err();
    assert!(matches!(store_error(&err), StoreError::NotFound(42)));
}

#[test]
fn test_update_nonexistent_task_fails() {
    let mut env = TestEnv::new();

    let err = env.store.update(&TaskPatch::new(42).name("title")).unwrap_err();
    assert!(matches!(store_error(&err), StoreError::NotFound(42)));
    assert_eq!(env.total_count(), 0);
}

#[test]
fn test_get_after_delete_fails() {
    let mut env = TestEnv::new();

    let task = env.add("get milk", "");
    env.store.delete(task.id).unwrap();

    assert!(env.store.get(task.id).is_err());
}

#[test]
fn test_delete_nonexistent_task_is_idempotent() {
    let mut env = TestEnv::new();

    assert!(!env.store.delete(42).unwrap());
    assert!(!env.store.delete(42).unwrap());
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_add_empty_name_fails() {
    let mut env = TestEnv::new();

    let err = env.store.add("", "groceries").unwrap_err();
    assert!(matches!(
        store_error(&err),
        StoreError::Validation(ValidationError::EmptyName)
    ));
    assert_eq!(env.total_count(), 0);
}

#[test]
fn test_update_to_empty_name_fails() {
    let mut env = TestEnv::new();

    let task = env.add("get milk", "groceries");
    let err = env.store.update(&TaskPatch::new(task.id).name("")).unwrap_err();
    assert!(matches!(store_error(&err), StoreError::Validation(_)));

    // Nothing was persisted
    assert_eq!(env.store.get(task.id).unwrap(), task);
}

#[test]
fn test_validation_error_message() {
    let mut env = TestEnv::new();

    let err = env.store.add("", "").unwrap_err();
    assert_eq!(err.to_string(), "validation error: task name cannot be empty");
}

// =============================================================================
// Filter Conflicts
// =============================================================================

#[test]
fn test_status_and_project_filters_conflict() {
    let err = Filter::from_options(Some(Status::Done), Some("groceries".to_string())).unwrap_err();
    assert!(matches!(store_error(&err), StoreError::ConflictingFilter));
    assert_eq!(err.to_string(), "can only filter by project or status, not both");
}

// =============================================================================
// Storage Unavailable
// =============================================================================

#[test]
fn test_open_under_a_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("occupied");
    fs::write(&file, "not a directory").unwrap();

    let err = Store::open(&file.join("tasks.db")).err().expect("open should fail");
    assert!(matches!(store_error(&err), StoreError::StorageUnavailable(_)));
}

#[test]
fn test_open_non_database_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.db");
    fs::write(&path, "not an sqlite database\n".repeat(64)).unwrap();

    let err = Store::open(&path).err().expect("open should fail");
    assert!(matches!(store_error(&err), StoreError::StorageUnavailable(_)));
}

#[test]
fn test_open_directory_as_database_fails() {
    let temp_dir = TempDir::new().unwrap();

    let err = Store::open(temp_dir.path()).err().expect("open should fail");
    assert!(matches!(store_error(&err), StoreError::StorageUnavailable(_)));
}
