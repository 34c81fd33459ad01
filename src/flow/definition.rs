use crate::canvas::{Position, Viewport};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

/// The only flow document version written by this crate.
pub const FLOW_VERSION: u32 = 1;

/// The kind of a flow node.
///
/// Unknown kinds are kept verbatim in [`NodeType::Other`] so that documents
/// produced by newer editors survive an import/export cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Webhook,
    Code,
    Http,
    Smtp,
    Other(String),
}

impl NodeType {
    /// The four kinds the editor knows how to configure.
    pub const KNOWN: [NodeType; 4] = [
        NodeType::Webhook,
        NodeType::Code,
        NodeType::Http,
        NodeType::Smtp,
    ];

    pub fn parse(name: &str) -> Self {
        match name {
            "webhook" => NodeType::Webhook,
            "code" => NodeType::Code,
            "http" => NodeType::Http,
            "smtp" => NodeType::Smtp,
            other => NodeType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Webhook => "webhook",
            NodeType::Code => "code",
            NodeType::Http => "http",
            NodeType::Smtp => "smtp",
            NodeType::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NodeType::Other(_))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(NodeType::parse(&name))
    }
}

/// A node in the persisted flow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub position: Position,
    /// Always written on export. Older or hand-written documents may omit it.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// One side of a persisted edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "nodeId")]
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl Endpoint {
    pub fn new(node_id: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            port: Some(port.into()),
        }
    }
}

/// A directed edge in the persisted flow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub from: Endpoint,
    pub to: Endpoint,
}

/// The persisted/exchanged flow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    /// Kept exactly as written so that unsupported versions stay visible.
    pub version: Number,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub viewport: Viewport,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            version: Number::from(FLOW_VERSION),
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
        }
    }
}

impl FlowState {
    /// `true` when the version is numerically [`FLOW_VERSION`] (`1` or `1.0`).
    pub fn has_supported_version(&self) -> bool {
        self.version.as_f64() == Some(f64::from(FLOW_VERSION))
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
