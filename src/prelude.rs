//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! flowdraft crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowdraft::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/flow.json")?;
//! let flow = parse_flow(&text)?;
//!
//! let snapshot = to_internal(flow);
//! let mut history = History::new(Snapshot::default());
//! history.set(snapshot);
//!
//! let exported = history.present().to_flow_state();
//! println!("{}", serde_json::to_string_pretty(&exported)?);
//! # Ok(())
//! # }
//! ```

// Canvas and persisted shapes
pub use crate::canvas::{CanvasEdge, CanvasNode, Position, Snapshot, Viewport};
pub use crate::flow::{
    Endpoint, FLOW_VERSION, FlowEdge, FlowNode, FlowState, FlowSummary, IntegrityIssue, NodeData,
    NodeType, STORAGE_KEY, check_integrity, parse_flow, to_external, to_internal, validate,
};

// History and editing
pub use crate::editor::{EditorAction, EditorConfig, EditorSession, KeyChord};
pub use crate::history::{History, HistoryLimit};

// Persistence
pub use crate::storage::{AutoSave, FileStore, FlowStore, MemoryStore, load_state, save_state};

// Error types
pub use crate::error::{CodecError, ImportError, StorageError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
