use super::EditorSession;
use crate::canvas::Snapshot;
use crate::flow::{STORAGE_KEY, to_internal};
use crate::history::{History, HistoryLimit};
use crate::storage::{AutoSave, DEFAULT_AUTOSAVE_DELAY, FlowStore, load_state};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Tunables of an editor session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Key the working flow is saved under.
    pub storage_key: String,
    /// Quiet period in milliseconds before an automatic save.
    pub autosave_delay_ms: u64,
    /// Maximum number of undo steps. `None` keeps all of them.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY.as_millis() as u64,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn history_limit(&self) -> HistoryLimit {
        self.history_limit
            .map_or(HistoryLimit::Unbounded, HistoryLimit::MaxPast)
    }
}

pub struct EditorBuilder<S: FlowStore> {
    store: S,
    config: EditorConfig,
}

impl<S: FlowStore> EditorBuilder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EditorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.config.storage_key = key.to_string();
        self
    }

    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.config.autosave_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_history_limit(mut self, max_undo_steps: usize) -> Self {
        self.config.history_limit = Some(max_undo_steps);
        self
    }

    /// Opens the session, restoring the saved flow if the store has a valid one.
    ///
    /// A restored flow is recorded on top of the empty canvas, so the first undo
    /// goes back to an empty editor.
    pub fn build(self) -> EditorSession<S> {
        let mut history = History::with_limit(Snapshot::default(), self.config.history_limit());

        if let Some(flow) = load_state(&self.store, &self.config.storage_key) {
            log::info!(
                "Restored saved flow with {} nodes and {} edges",
                flow.nodes.len(),
                flow.edges.len()
            );
            history.set(to_internal(flow));
        }

        EditorSession {
            autosave: AutoSave::new(self.config.autosave_delay()),
            store: self.store,
            config: self.config,
            history,
            selected_node: None,
            selected_edges: Vec::new(),
            last_error: None,
        }
    }
}
