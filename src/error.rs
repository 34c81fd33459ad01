use thiserror::Error;

/// Structural problems found while validating an untrusted flow document.
///
/// Checks run in a fixed order and stop at the first failure, so each variant
/// names the first field that did not match the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON")]
    NotAnObject,

    #[error("Missing version")]
    MissingVersion,

    #[error("Missing nodes[]")]
    MissingNodes,

    #[error("Missing edges[]")]
    MissingEdges,

    #[error("Missing viewport")]
    MissingViewport,

    #[error("Node missing id")]
    NodeMissingId,

    #[error("Node {node_id} missing type")]
    NodeMissingType { node_id: String },

    #[error("Node {node_id} invalid position")]
    NodeInvalidPosition { node_id: String },

    #[error("Node {node_id} invalid data")]
    NodeInvalidData { node_id: String },

    #[error("Edge missing id")]
    EdgeMissingId,

    #[error("Edge {edge_id} invalid endpoints")]
    EdgeInvalidEndpoints { edge_id: String },
}

/// Errors raised while importing a flow document from raw text.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to parse flow JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors raised while encoding flows or reading typed node data.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to serialize flow: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Node data does not match the '{kind}' shape: {source}")]
    NodeData {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors reported by a persistence backend.
///
/// Callers going through `storage::load_state`/`save_state` never see these:
/// persistence is best-effort and failures are only logged.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}
