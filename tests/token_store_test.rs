// ABOUTME: Tests for the file-backed backend session token store
// ABOUTME: Missing files, directory creation, whitespace handling, and idempotent clearing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use basebody::backend::{FileTokenStore, TokenStore};
use basebody::errors::BackendError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_means_no_session() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("session_token"));

    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("basebody").join("session_token");
    let store = FileTokenStore::new(&path);

    store.save("jwt-abc").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "jwt-abc");
    assert_eq!(store.load().unwrap().as_deref(), Some("jwt-abc"));
}

#[test]
fn test_save_replaces_previous_token() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("session_token"));

    store.save("first").unwrap();
    store.save("second").unwrap();

    assert_eq!(store.load().unwrap().as_deref(), Some("second"));
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session_token");
    fs::write(&path, "  jwt-edited-by-hand\n").unwrap();

    let store = FileTokenStore::new(&path);

    assert_eq!(store.load().unwrap().as_deref(), Some("jwt-edited-by-hand"));
}

#[test]
fn test_blank_file_means_no_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session_token");
    fs::write(&path, "\n").unwrap();

    assert_eq!(FileTokenStore::new(&path).load().unwrap(), None);
}

#[test]
fn test_clear_removes_file_and_tolerates_repeat() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session_token");
    let store = FileTokenStore::new(&path);
    store.save("jwt").unwrap();

    store.clear().unwrap();
    store.clear().unwrap();

    assert!(!path.exists());
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_unreadable_path_is_storage_error() {
    let dir = TempDir::new().unwrap();
    // A directory where the token file should be
    let store = FileTokenStore::new(dir.path());

    assert!(matches!(store.load().unwrap_err(), BackendError::Storage(_)));
}

#[cfg(unix)]
#[test]
fn test_saved_token_is_private_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session_token");
    FileTokenStore::new(&path).save("jwt").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn test_save_restricts_existing_world_readable_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session_token");
    fs::write(&path, "old").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    FileTokenStore::new(&path).save("jwt-new").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(fs::read_to_string(&path).unwrap(), "jwt-new");
}
