//! Tests for best-effort persistence and autosave debouncing.
mod common;
use common::*;
use flowdraft::prelude::*;
use std::time::{Duration, Instant};

/// A store that fails every operation.
struct BrokenStore;

impl FlowStore for BrokenStore {
    fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _raw: &str) -> std::result::Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn test_memory_store_round_trip() {
    let mut store = MemoryStore::new();
    let flow = create_linear_flow();
    save_state(&mut store, STORAGE_KEY, &flow);
    assert_eq!(store.len(), 1);
    assert_eq!(load_state(&store, STORAGE_KEY), Some(flow));
}

#[test]
fn test_load_without_saved_state_is_none() {
    let store = MemoryStore::new();
    assert_eq!(load_state(&store, STORAGE_KEY), None);
}

#[test]
fn test_load_treats_garbage_as_no_saved_state() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, "{definitely not json").unwrap();
    assert_eq!(load_state(&store, STORAGE_KEY), None);

    store.set(STORAGE_KEY, r#"{"version": 1}"#).unwrap();
    assert_eq!(load_state(&store, STORAGE_KEY), None);
}

#[test]
fn test_broken_store_is_swallowed() {
    let mut store = BrokenStore;
    save_state(&mut store, STORAGE_KEY, &create_linear_flow());
    assert_eq!(load_state(&store, STORAGE_KEY), None);
}

#[test]
fn test_file_store_creates_directory_and_round_trips() {
    let dir = scratch_dir("file-store");
    let mut store = FileStore::new(&dir);
    assert_eq!(store.get("missing").unwrap(), None);

    let flow = create_linear_flow();
    save_state(&mut store, "flow", &flow);
    assert!(store.path_for("flow").exists());
    assert_eq!(load_state(&store, "flow"), Some(flow));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_store_over_a_regular_file_is_unavailable() {
    let path = scratch_dir("not-a-dir");
    std::fs::write(&path, "occupied").unwrap();
    let mut store = FileStore::new(&path);
    assert_eq!(store.dir(), path.as_path());

    assert!(matches!(store.get("flow"), Err(StorageError::Unavailable(_))));
    let err = store.set("flow", "{}").unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(err.to_string().ends_with("is not a directory"));

    // Best-effort helpers swallow the failure.
    save_state(&mut store, "flow", &create_linear_flow());
    assert_eq!(load_state(&store, "flow"), None);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_boxed_store_forwards() {
    let mut store: Box<dyn FlowStore> = Box::new(MemoryStore::new());
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_autosave_waits_for_quiet_period() {
    let start = Instant::now();
    let mut autosave = AutoSave::new(Duration::from_millis(350));
    assert!(!autosave.is_due(start));

    autosave.mark_dirty(start);
    assert!(!autosave.is_due(start + Duration::from_millis(100)));
    assert!(autosave.is_due(start + Duration::from_millis(350)));
}

#[test]
fn test_autosave_restarts_on_every_edit() {
    let start = Instant::now();
    let mut autosave = AutoSave::new(Duration::from_millis(350));

    // Rapid edits keep pushing the save back.
    for step in 0..5 {
        autosave.mark_dirty(start + Duration::from_millis(step * 100));
    }
    assert!(!autosave.take_due(start + Duration::from_millis(700)));
    assert!(autosave.take_due(start + Duration::from_millis(750)));

    // Consumed: nothing further is due.
    assert!(!autosave.is_dirty());
    assert!(!autosave.take_due(start + Duration::from_secs(10)));
}
