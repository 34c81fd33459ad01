//! Common test utilities for building flows, snapshots and scratch stores.
use flowdraft::prelude::*;
use serde_json::{Map, Number, Value, json};
use std::path::PathBuf;

/// The single-webhook document used by the import scenario.
#[allow(dead_code)]
pub const WEBHOOK_FLOW_JSON: &str = r#"{"version":1,"nodes":[{"id":"a","type":"webhook","position":{"x":0,"y":0},"label":"Start","data":{"method":"POST","path":"/in"}}],"edges":[],"viewport":{"x":0,"y":0,"zoom":1}}"#;

#[allow(dead_code)]
pub fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

#[allow(dead_code)]
pub fn flow_node(id: &str, kind: NodeType, label: Option<&str>, data: Value) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        kind,
        position: Position::new(10.0, 20.0),
        label: label.map(str::to_string),
        data: self::data(data),
    }
}

#[allow(dead_code)]
pub fn flow_edge(id: &str, from: &str, to: &str) -> FlowEdge {
    FlowEdge {
        id: id.to_string(),
        from: Endpoint::new(from, "out"),
        to: Endpoint::new(to, "in"),
    }
}

/// Webhook -> HTTP -> SMTP, every label set explicitly.
#[allow(dead_code)]
pub fn create_linear_flow() -> FlowState {
    FlowState {
        version: Number::from(FLOW_VERSION),
        nodes: vec![
            flow_node(
                "hook",
                NodeType::Webhook,
                Some("Inbound"),
                json!({"method": "POST", "path": "/inbound"}),
            ),
            flow_node(
                "fetch",
                NodeType::Http,
                Some("Fetch user"),
                json!({"method": "GET", "url": "https://api.example.com/users", "headers": [], "bodyMode": "none"}),
            ),
            flow_node(
                "mail",
                NodeType::Smtp,
                Some("Notify"),
                json!({"host": "smtp.example.com", "port": 587}),
            ),
        ],
        edges: vec![
            flow_edge("e1", "hook", "fetch"),
            flow_edge("e2", "fetch", "mail"),
        ],
        viewport: Viewport {
            x: 12.5,
            y: -40.0,
            zoom: 0.75,
        },
    }
}

/// A snapshot with `n` code nodes, distinguishable by their x position.
#[allow(dead_code)]
pub fn snapshot_with_nodes(n: usize) -> Snapshot {
    let nodes = (0..n)
        .map(|i| CanvasNode {
            id: format!("node-{}", i),
            kind: NodeType::Code,
            position: Position::new(i as f64, 0.0),
            data: data(json!({"name": format!("Step {}", i)})),
        })
        .collect();
    Snapshot::new(nodes, Vec::new(), Viewport::default())
}

/// A fresh, not yet created directory under the system temp dir.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "flowdraft-test-{}-{}-{}",
        name,
        std::process::id(),
        flowdraft::flow::uid("d")
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
