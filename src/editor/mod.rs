//! Editor session: canvas state, undo/redo, selection and persistence.
//!
//! An [`EditorSession`] is the single owner of everything an editor mutates. The
//! rendering layer feeds user gestures in through its methods and reads the
//! current [`Snapshot`] back out. Every structural edit records exactly one
//! history entry. Undo and redo restore entries without recording new ones.

use crate::canvas::{CanvasEdge, CanvasNode, Position, Snapshot, Viewport};
use crate::error::{CodecError, ImportError};
use crate::flow::{
    FlowState, NodeType, defaults::random_base36, default_node_data, is_truthy, parse_flow,
    to_internal,
};
use crate::history::History;
use crate::storage::{AutoSave, FlowStore, save_state};
use serde_json::{Map, Value};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

mod builder;
mod shortcuts;

pub use builder::{EditorBuilder, EditorConfig};
pub use shortcuts::{EditorAction, KeyChord};

/// Message shown when an import fails without a more specific reason.
pub const IMPORT_FALLBACK_ERROR: &str = "Failed to import JSON";

pub struct EditorSession<S: FlowStore> {
    store: S,
    config: EditorConfig,
    history: History<Snapshot>,
    selected_node: Option<String>,
    selected_edges: Vec<String>,
    last_error: Option<String>,
    autosave: AutoSave,
}

impl<S: FlowStore> EditorSession<S> {
    pub fn builder(store: S) -> EditorBuilder<S> {
        EditorBuilder::new(store)
    }

    /// Opens a session with the default configuration.
    pub fn open(store: S) -> Self {
        EditorBuilder::new(store).build()
    }

    /// The canvas as it currently stands.
    pub fn snapshot(&self) -> &Snapshot {
        self.history.present()
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Message of the last failed import, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // --- Structural edits ---

    /// Adds a node of `kind` with its default data and returns the new id.
    pub fn add_node(&mut self, kind: NodeType, position: Position) -> String {
        let id = new_node_id();
        let mut data = default_node_data(&kind);
        let label = data
            .get("name")
            .filter(|name| is_truthy(name))
            .cloned()
            .unwrap_or_else(|| Value::String(kind.to_string()));
        data.insert("label".to_string(), label);

        let mut next = self.snapshot().clone();
        next.nodes.push(CanvasNode {
            id: id.clone(),
            kind,
            position,
            data,
        });
        log::debug!("Added node '{}'", id);
        self.record(next);
        id
    }

    /// Moves a node. Returns `false` if no node has that id.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> bool {
        let mut next = self.snapshot().clone();
        let Some(node) = next.nodes.iter_mut().find(|n| n.id == node_id) else {
            return false;
        };
        node.position = position;
        self.record(next);
        true
    }

    /// Replaces a node's data mapping.
    ///
    /// The display label follows the new `name` when it is set and otherwise
    /// keeps the previous label. Returns `false` if no node has that id.
    pub fn update_node_data(&mut self, node_id: &str, mut data: Map<String, Value>) -> bool {
        let mut next = self.snapshot().clone();
        let Some(node) = next.nodes.iter_mut().find(|n| n.id == node_id) else {
            return false;
        };

        let label = data
            .get("name")
            .filter(|name| is_truthy(name))
            .or_else(|| node.data.get("label"))
            .cloned();
        match label {
            Some(label) => {
                data.insert("label".to_string(), label);
            }
            None => {
                data.shift_remove("label");
            }
        }
        node.data = data;
        self.record(next);
        true
    }

    /// Connects two nodes and returns the new edge id.
    ///
    /// Returns `None` without recording anything when either node id is empty or
    /// an edge with the same endpoints and handles already exists.
    pub fn connect(
        &mut self,
        source: &str,
        source_handle: Option<&str>,
        target: &str,
        target_handle: Option<&str>,
    ) -> Option<String> {
        if source.is_empty() || target.is_empty() {
            return None;
        }
        let same_handle = |a: Option<&str>, b: Option<&str>| {
            a == b || (a.is_none_or(str::is_empty) && b.is_none_or(str::is_empty))
        };
        let exists = self.snapshot().edges.iter().any(|e| {
            e.source == source
                && e.target == target
                && same_handle(e.source_handle.as_deref(), source_handle)
                && same_handle(e.target_handle.as_deref(), target_handle)
        });
        if exists {
            log::debug!("Ignoring duplicate connection {} -> {}", source, target);
            return None;
        }

        let id = format!(
            "reactflow__edge-{}{}-{}{}",
            source,
            source_handle.unwrap_or(""),
            target,
            target_handle.unwrap_or("")
        );
        let mut next = self.snapshot().clone();
        next.edges.push(CanvasEdge {
            id: id.clone(),
            source: source.to_string(),
            source_handle: source_handle.map(str::to_string),
            target: target.to_string(),
            target_handle: target_handle.map(str::to_string),
        });
        self.record(next);
        Some(id)
    }

    /// Deletes the selected edges, then the selected node with every edge
    /// touching it. Records nothing and returns `false` if nothing was removed.
    pub fn delete_selection(&mut self) -> bool {
        let mut next = self.snapshot().clone();
        let before = (next.nodes.len(), next.edges.len());

        if !self.selected_edges.is_empty() {
            let selected = std::mem::take(&mut self.selected_edges);
            next.edges.retain(|e| !selected.contains(&e.id));
        }
        if let Some(node_id) = self.selected_node.take() {
            next.edges.retain(|e| !e.touches(&node_id));
            next.nodes.retain(|n| n.id != node_id);
        }

        if (next.nodes.len(), next.edges.len()) == before {
            return false;
        }
        log::debug!(
            "Deleted {} node(s) and {} edge(s)",
            before.0 - next.nodes.len(),
            before.1 - next.edges.len()
        );
        self.record(next);
        true
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        let mut next = self.snapshot().clone();
        next.viewport = viewport;
        self.record(next);
    }

    /// Pans back to the origin at zoom 1.
    pub fn reset_view(&mut self) {
        self.set_viewport(Viewport::default());
    }

    // --- Selection ---

    pub fn select_node(&mut self, node_id: Option<&str>) {
        self.selected_node = node_id.map(str::to_string);
    }

    pub fn select_edges<I, T>(&mut self, edge_ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.selected_edges = edge_ids.into_iter().map(Into::into).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_node = None;
        self.selected_edges.clear();
    }

    /// The selected node, if it still exists on the canvas.
    pub fn selected_node(&self) -> Option<&CanvasNode> {
        let id = self.selected_node.as_deref()?;
        self.snapshot().node(id)
    }

    pub fn selected_edges(&self) -> &[String] {
        &self.selected_edges
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.autosave.mark_dirty(Instant::now());
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.autosave.mark_dirty(Instant::now());
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Runs a keyboard-triggered action. Returns whether anything changed.
    pub fn apply(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::DeleteSelection => self.delete_selection(),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
        }
    }

    /// Maps a key chord to an action and runs it. Returns `None` for unbound keys.
    pub fn handle_key(&mut self, chord: &KeyChord) -> Option<bool> {
        EditorAction::from_key(chord).map(|action| self.apply(action))
    }

    // --- Import / export ---

    pub fn export_flow(&self) -> FlowState {
        self.snapshot().to_flow_state()
    }

    /// The current flow as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(&self.export_flow()).map_err(CodecError::Serialize)
    }

    /// Replaces the canvas with the flow in `text`.
    ///
    /// The text is parsed and validated before anything changes; on failure the
    /// canvas is left as it was and the message is kept in [`Self::last_error`].
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        match parse_flow(text) {
            Ok(flow) => {
                log::info!(
                    "Imported flow with {} nodes and {} edges",
                    flow.nodes.len(),
                    flow.edges.len()
                );
                let next = to_internal(flow);
                self.clear_selection();
                self.last_error = None;
                self.record(next);
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("Import rejected: {}", message);
                self.last_error = Some(if message.is_empty() {
                    IMPORT_FALLBACK_ERROR.to_string()
                } else {
                    message
                });
                Err(e)
            }
        }
    }

    // --- Persistence ---

    /// Saves the flow if the autosave quiet period has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.autosave.take_due(now) {
            return false;
        }
        self.save();
        true
    }

    /// Whether edits are waiting for an automatic save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.autosave.is_dirty()
    }

    /// Saves the flow right away and cancels any pending automatic save.
    pub fn flush(&mut self) {
        self.autosave.clear();
        self.save();
    }

    fn save(&mut self) {
        let flow = self.export_flow();
        save_state(&mut self.store, &self.config.storage_key, &flow);
    }

    fn record(&mut self, next: Snapshot) {
        self.history.set(next);
        self.autosave.mark_dirty(Instant::now());
    }
}

/// `"{unix millis}_{4 base-36 chars}"`, unique enough for interactive editing.
fn new_node_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}_{}", millis, random_base36(4))
}
