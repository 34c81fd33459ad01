use super::definition::{FLOW_VERSION, FlowState};
use ahash::AHashSet;
use serde_json::Number;
use std::fmt;

/// A referential or semantic problem that structural validation lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    UnsupportedVersion(Number),
    DuplicateNodeId(String),
    DuplicateEdgeId(String),
    UnknownNodeType { node_id: String, type_name: String },
    DanglingEndpoint { edge_id: String, node_id: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::UnsupportedVersion(v) => {
                write!(f, "version {} is not supported (expected {})", v, FLOW_VERSION)
            }
            IntegrityIssue::DuplicateNodeId(id) => write!(f, "node id '{}' is used more than once", id),
            IntegrityIssue::DuplicateEdgeId(id) => write!(f, "edge id '{}' is used more than once", id),
            IntegrityIssue::UnknownNodeType { node_id, type_name } => {
                write!(f, "node '{}' has unknown type '{}'", node_id, type_name)
            }
            IntegrityIssue::DanglingEndpoint { edge_id, node_id } => {
                write!(f, "edge '{}' references missing node '{}'", edge_id, node_id)
            }
        }
    }
}

/// Reports every integrity issue in `flow`, in document order.
///
/// Import never runs this; an empty result is not required for a flow to load.
pub fn check_integrity(flow: &FlowState) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    if !flow.has_supported_version() {
        issues.push(IntegrityIssue::UnsupportedVersion(flow.version.clone()));
    }

    let mut node_ids: AHashSet<&str> = AHashSet::with_capacity(flow.nodes.len());
    for node in &flow.nodes {
        if !node_ids.insert(node.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateNodeId(node.id.clone()));
        }
        if !node.kind.is_known() {
            issues.push(IntegrityIssue::UnknownNodeType {
                node_id: node.id.clone(),
                type_name: node.kind.to_string(),
            });
        }
    }

    let mut edge_ids: AHashSet<&str> = AHashSet::with_capacity(flow.edges.len());
    for edge in &flow.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateEdgeId(edge.id.clone()));
        }
        for endpoint in [&edge.from, &edge.to] {
            if !node_ids.contains(endpoint.node_id.as_str()) {
                issues.push(IntegrityIssue::DanglingEndpoint {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.node_id.clone(),
                });
            }
        }
    }

    issues
}
