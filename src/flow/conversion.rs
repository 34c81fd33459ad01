use super::definition::{Endpoint, FLOW_VERSION, FlowEdge, FlowNode, FlowState};
use super::value_text;
use crate::canvas::{CanvasEdge, CanvasNode, Snapshot, Viewport};
use serde_json::{Number, Value};

/// Port name used when a canvas edge has no source handle.
pub const DEFAULT_SOURCE_PORT: &str = "out";
/// Port name used when a canvas edge has no target handle.
pub const DEFAULT_TARGET_PORT: &str = "in";

/// Converts a persisted flow into the canvas representation.
///
/// The top-level `label` of every node is injected into its data mapping and
/// overrides any `label` key already there. A node without a top-level label
/// ends up with no `label` key at all. Edge ports become handles unchanged.
pub fn to_internal(flow: FlowState) -> Snapshot {
    let nodes = flow
        .nodes
        .into_iter()
        .map(|node| {
            let mut data = node.data;
            match node.label {
                Some(label) => {
                    data.insert("label".to_string(), Value::String(label));
                }
                None => {
                    data.shift_remove("label");
                }
            }
            CanvasNode {
                id: node.id,
                kind: node.kind,
                position: node.position,
                data,
            }
        })
        .collect();

    let edges = flow
        .edges
        .into_iter()
        .map(|edge| CanvasEdge {
            id: edge.id,
            source: edge.from.node_id,
            source_handle: edge.from.port,
            target: edge.to.node_id,
            target_handle: edge.to.port,
        })
        .collect();

    Snapshot::new(nodes, edges, flow.viewport)
}

/// Converts canvas state into the persisted flow representation.
///
/// Labels are derived as `data.label`, then `data.name`, then the node type. The
/// data mapping is copied as-is, so it keeps any `label`/`name` keys it had.
pub fn to_external(nodes: &[CanvasNode], edges: &[CanvasEdge], viewport: Viewport) -> FlowState {
    let nodes = nodes
        .iter()
        .map(|node| FlowNode {
            id: node.id.clone(),
            kind: node.kind.clone(),
            position: node.position,
            label: Some(derive_label(node)),
            data: node.data.clone(),
        })
        .collect();

    let edges = edges
        .iter()
        .map(|edge| FlowEdge {
            id: edge.id.clone(),
            from: Endpoint::new(
                edge.source.clone(),
                handle_or(&edge.source_handle, DEFAULT_SOURCE_PORT),
            ),
            to: Endpoint::new(
                edge.target.clone(),
                handle_or(&edge.target_handle, DEFAULT_TARGET_PORT),
            ),
        })
        .collect();

    FlowState {
        version: Number::from(FLOW_VERSION),
        nodes,
        edges,
        viewport,
    }
}

impl Snapshot {
    pub fn to_flow_state(&self) -> FlowState {
        to_external(&self.nodes, &self.edges, self.viewport)
    }
}

impl From<FlowState> for Snapshot {
    fn from(flow: FlowState) -> Self {
        to_internal(flow)
    }
}

/// Display label of a canvas node. Only absent or `null` values fall through.
pub fn derive_label(node: &CanvasNode) -> String {
    ["label", "name"]
        .iter()
        .filter_map(|key| node.data.get(*key))
        .find(|value| !value.is_null())
        .map(value_text)
        .unwrap_or_else(|| node.kind.to_string())
}

fn handle_or(handle: &Option<String>, fallback: &str) -> String {
    match handle.as_deref() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => fallback.to_string(),
    }
}
