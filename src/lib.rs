//! # Flowdraft - Flow Editor Core
//!
//! **Flowdraft** is the state core of a visual editor for small automation flows:
//! webhook, code, HTTP and SMTP nodes connected by directed edges. It does not
//! render anything and it never runs a flow. It keeps the editor's state honest:
//!
//! - a linear undo/redo [`History`](history::History) over immutable canvas
//!   [`Snapshot`](canvas::Snapshot)s,
//! - a codec between the canvas representation and the persisted
//!   [`FlowState`](flow::FlowState) JSON document,
//! - structural validation of untrusted imports,
//! - best-effort persistence through an injected [`FlowStore`](storage::FlowStore),
//! - an [`EditorSession`](editor::EditorSession) tying them together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowdraft::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Open a session backed by files in ./state; any saved flow is restored.
//!     let mut editor = EditorSession::builder(FileStore::new("state"))
//!         .with_history_limit(200)
//!         .build();
//!
//!     // Edit the canvas. Every edit is one undo step.
//!     let hook = editor.add_node(NodeType::Webhook, Position::new(0.0, 0.0));
//!     let mail = editor.add_node(NodeType::Smtp, Position::new(240.0, 0.0));
//!     editor.connect(&hook, Some("out"), &mail, Some("in"));
//!
//!     editor.undo();
//!     editor.redo();
//!
//!     // Export the persisted document and save it.
//!     println!("{}", editor.export_json()?);
//!     editor.flush();
//!
//!     // Import validates first; a bad document leaves the canvas untouched.
//!     if let Err(e) = editor.import_json("{}") {
//!         println!("Import failed: {}", e); // "Missing version"
//!     }
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod editor;
pub mod error;
pub mod flow;
pub mod history;
pub mod prelude;
pub mod storage;
