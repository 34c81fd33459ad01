//! Best-effort persistence of the working flow.
//!
//! Stores are injected wherever persistence is needed. Nothing in this crate
//! reaches for a global store, and a failing store never makes the editor unusable:
//! [`load_state`] treats every failure as "nothing saved" and [`save_state`]
//! only logs.

use crate::error::StorageError;
use crate::flow::{FlowState, validate};
use ahash::AHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Quiet period after the last edit before an automatic save is written.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(350);

/// A key/value store for raw flow documents.
pub trait FlowStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, raw: &str) -> Result<(), StorageError>;
}

impl<S: FlowStore + ?Sized> FlowStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, raw: &str) -> Result<(), StorageError> {
        (**self).set(key, raw)
    }
}

impl<S: FlowStore + ?Sized> FlowStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, raw: &str) -> Result<(), StorageError> {
        (**self).set(key, raw)
    }
}

/// In-process store, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FlowStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, raw: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// A store whose directory path is taken by a regular file can never work.
    fn ensure_usable(&self) -> Result<(), StorageError> {
        let dir = self.dir();
        if dir.exists() && !dir.is_dir() {
            return Err(StorageError::Unavailable(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }
}

impl FlowStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_usable()?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, raw: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        self.ensure_usable()?;
        fs::create_dir_all(self.dir()).map_err(io_err)?;
        fs::write(self.path_for(key), raw).map_err(io_err)
    }
}

/// Loads the flow saved under `key`.
///
/// Returns `None` when nothing is saved and also when the store fails or the
/// saved text is not a valid flow document.
pub fn load_state<S: FlowStore + ?Sized>(store: &S, key: &str) -> Option<FlowState> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read saved flow: {}", e);
            return None;
        }
    };

    let parsed = serde_json::from_str::<serde_json::Value>(&raw)
        .map_err(|e| e.to_string())
        .and_then(|value| validate(&value).map_err(|e| e.to_string()));
    match parsed {
        Ok(flow) => {
            log::debug!(
                "Loaded saved flow '{}' with {} nodes and {} edges",
                key,
                flow.nodes.len(),
                flow.edges.len()
            );
            Some(flow)
        }
        Err(e) => {
            log::warn!("Ignoring unreadable saved flow '{}': {}", key, e);
            None
        }
    }
}

/// Saves `flow` under `key`. Failures are logged and otherwise ignored.
pub fn save_state<S: FlowStore + ?Sized>(store: &mut S, key: &str, flow: &FlowState) {
    let raw = match serde_json::to_string(flow) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Could not serialize flow for saving: {}", e);
            return;
        }
    };
    match store.set(key, &raw) {
        Ok(()) => log::debug!("Saved flow '{}' ({} bytes)", key, raw.len()),
        Err(e) => log::warn!("Could not save flow '{}': {}", key, e),
    }
}

/// Debounces automatic saves: a save becomes due once no edit has happened
/// for `delay`.
#[derive(Debug, Clone)]
pub struct AutoSave {
    delay: Duration,
    dirty_since: Option<Instant>,
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

impl AutoSave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            dirty_since: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records an edit at `now`, restarting the quiet period.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.dirty_since
            .is_some_and(|since| now.saturating_duration_since(since) >= self.delay)
    }

    /// Returns `true` and clears the pending edit if a save is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.dirty_since = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.dirty_since = None;
    }
}
