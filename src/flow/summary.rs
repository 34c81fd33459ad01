use super::definition::FlowState;
use itertools::Itertools;
use serde_json::Number;
use std::fmt;

/// Node and edge counts of a flow, grouped by node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSummary {
    pub version: Number,
    /// `(type name, count)` sorted by type name.
    pub node_counts: Vec<(String, usize)>,
    pub node_total: usize,
    pub edge_total: usize,
}

impl FlowSummary {
    pub fn of(flow: &FlowState) -> Self {
        let node_counts = flow
            .nodes
            .iter()
            .map(|n| n.kind.to_string())
            .counts()
            .into_iter()
            .sorted()
            .collect();
        Self {
            version: flow.version.clone(),
            node_counts,
            node_total: flow.nodes.len(),
            edge_total: flow.edges.len(),
        }
    }
}

impl fmt::Display for FlowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{}: {} nodes • {} edges",
            self.version, self.node_total, self.edge_total
        )?;
        if !self.node_counts.is_empty() {
            let breakdown = self
                .node_counts
                .iter()
                .map(|(kind, count)| format!("{} {}", count, kind))
                .join(", ");
            write!(f, " ({})", breakdown)?;
        }
        Ok(())
    }
}
