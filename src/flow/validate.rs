//! Structural validation of untrusted flow documents.
//!
//! [`validate`] runs a fixed sequence of shape checks over parsed JSON and stops
//! at the first failure. On success it hands back the typed [`FlowState`], so
//! callers never convert a document that has not been checked.
//!
//! The checks are deliberately shallow. They do not restrict node types to the
//! known kinds, require edge endpoints to reference existing nodes, require
//! unique ids or check the version number. See [`super::integrity`] for an
//! opt-in report on those.

use super::definition::{Endpoint, FlowEdge, FlowNode, FlowState, NodeType};
use super::{is_truthy, value_text};
use crate::canvas::{Position, Viewport};
use crate::error::{ImportError, ValidationError};
use serde_json::{Map, Value};

/// Parses raw JSON text and validates it as a flow document.
pub fn parse_flow(text: &str) -> Result<FlowState, ImportError> {
    let candidate: Value = serde_json::from_str(text)?;
    Ok(validate(&candidate)?)
}

/// Checks that `candidate` has the shape of a flow document and returns it typed.
pub fn validate(candidate: &Value) -> Result<FlowState, ValidationError> {
    let root = candidate.as_object().ok_or(ValidationError::NotAnObject)?;

    let version = match root.get("version") {
        Some(Value::Number(version)) => version.clone(),
        _ => return Err(ValidationError::MissingVersion),
    };
    let raw_nodes = root
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingNodes)?;
    let raw_edges = root
        .get("edges")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingEdges)?;
    let viewport = root
        .get("viewport")
        .and_then(read_viewport)
        .ok_or(ValidationError::MissingViewport)?;

    let nodes = raw_nodes
        .iter()
        .map(validate_node)
        .collect::<Result<Vec<_>, _>>()?;
    let edges = raw_edges
        .iter()
        .map(validate_edge)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FlowState {
        version,
        nodes,
        edges,
        viewport,
    })
}

fn validate_node(raw: &Value) -> Result<FlowNode, ValidationError> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or(ValidationError::NodeMissingId)?
        .to_string();

    let kind = match raw.get("type") {
        Some(Value::String(name)) if !name.is_empty() => NodeType::parse(name),
        Some(other) if is_truthy(other) => NodeType::Other(value_text(other)),
        _ => return Err(ValidationError::NodeMissingType { node_id: id }),
    };

    let Some(position) = raw.get("position").and_then(read_position) else {
        return Err(ValidationError::NodeInvalidPosition { node_id: id });
    };

    let Some(data) = raw.get("data").and_then(read_data) else {
        return Err(ValidationError::NodeInvalidData { node_id: id });
    };

    let label = match raw.get("label") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_text(value)),
    };

    Ok(FlowNode {
        id,
        kind,
        position,
        label,
        data,
    })
}

fn validate_edge(raw: &Value) -> Result<FlowEdge, ValidationError> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or(ValidationError::EdgeMissingId)?
        .to_string();

    match (read_endpoint(raw.get("from")), read_endpoint(raw.get("to"))) {
        (Some(from), Some(to)) => Ok(FlowEdge { id, from, to }),
        _ => Err(ValidationError::EdgeInvalidEndpoints { edge_id: id }),
    }
}

fn read_viewport(raw: &Value) -> Option<Viewport> {
    Some(Viewport {
        x: raw.get("x")?.as_f64()?,
        y: raw.get("y")?.as_f64()?,
        zoom: raw.get("zoom")?.as_f64()?,
    })
}

fn read_position(raw: &Value) -> Option<Position> {
    Some(Position {
        x: raw.get("x")?.as_f64()?,
        y: raw.get("y")?.as_f64()?,
    })
}

/// Anything object-like is accepted: `null` reads as an empty mapping and arrays
/// are keyed by index.
fn read_data(raw: &Value) -> Option<Map<String, Value>> {
    match raw {
        Value::Object(map) => Some(map.clone()),
        Value::Null => Some(Map::new()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.clone()))
                .collect(),
        ),
        _ => None,
    }
}

fn read_endpoint(raw: Option<&Value>) -> Option<Endpoint> {
    let raw = raw?;
    let node_id = raw.get("nodeId").filter(|v| is_truthy(v))?;
    let port = match raw.get("port") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_text(value)),
    };
    Some(Endpoint {
        node_id: value_text(node_id),
        port,
    })
}
