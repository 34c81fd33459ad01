//! Typed views over the open per-node data mapping.
//!
//! Canvas and persisted nodes keep their data as a free-form JSON object so that
//! unknown keys survive editing. These types give the four known kinds a checked
//! shape on demand: read with [`NodeData::from_map`], write back with
//! [`NodeData::into_map`].

use super::definition::NodeType;
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    #[default]
    None,
    Json,
    Text,
    Form,
}

/// Inbound trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookData {
    pub name: String,
    pub method: WebhookMethod,
    pub path: String,
}

impl Default for WebhookData {
    fn default() -> Self {
        Self {
            name: "Webhook".to_string(),
            method: WebhookMethod::Post,
            path: "/inbound".to_string(),
        }
    }
}

/// Inline script step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeData {
    pub name: String,
    pub language: String,
    pub code: String,
}

impl Default for CodeData {
    fn default() -> Self {
        Self {
            name: "Code".to_string(),
            language: "JavaScript".to_string(),
            code: "// write code here\n".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Outbound HTTP request step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpData {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body_mode: BodyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Default for HttpData {
    fn default() -> Self {
        Self {
            name: "HTTP Request".to_string(),
            method: HttpMethod::Get,
            url: "https://api.example.com".to_string(),
            headers: Vec::new(),
            body_mode: BodyMode::None,
            body: None,
        }
    }
}

/// Outbound mail step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpData {
    pub name: String,
    pub host: String,
    pub port: u32,
    pub username: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl Default for SmtpData {
    fn default() -> Self {
        Self {
            name: "SMTP".to_string(),
            host: "smtp.example.com".to_string(),
            port: 587,
            username: String::new(),
            from: String::new(),
            to: String::new(),
            subject: String::new(),
            text: String::new(),
            html: String::new(),
        }
    }
}

/// Node data keyed by node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Webhook(WebhookData),
    Code(CodeData),
    Http(HttpData),
    Smtp(SmtpData),
    /// Data of a kind this crate does not model, kept as-is.
    Other(Map<String, Value>),
}

impl NodeData {
    /// Default configuration for a freshly created node.
    pub fn defaults(kind: &NodeType) -> Self {
        match kind {
            NodeType::Webhook => NodeData::Webhook(WebhookData::default()),
            NodeType::Code => NodeData::Code(CodeData::default()),
            NodeType::Http => NodeData::Http(HttpData::default()),
            NodeType::Smtp => NodeData::Smtp(SmtpData::default()),
            NodeType::Other(_) => NodeData::Other(Map::new()),
        }
    }

    /// Reads the typed view of `data` for `kind`.
    ///
    /// Missing fields take the kind's defaults and keys the kind does not know
    /// (such as the display `label`) are ignored. Fields of the wrong type fail.
    pub fn from_map(kind: &NodeType, data: &Map<String, Value>) -> Result<Self, CodecError> {
        let value = Value::Object(data.clone());
        let typed = match kind {
            NodeType::Webhook => serde_json::from_value(value).map(NodeData::Webhook),
            NodeType::Code => serde_json::from_value(value).map(NodeData::Code),
            NodeType::Http => serde_json::from_value(value).map(NodeData::Http),
            NodeType::Smtp => serde_json::from_value(value).map(NodeData::Smtp),
            NodeType::Other(_) => return Ok(NodeData::Other(data.clone())),
        };
        typed.map_err(|source| CodecError::NodeData {
            kind: kind.to_string(),
            source,
        })
    }

    pub fn kind(&self) -> Option<NodeType> {
        match self {
            NodeData::Webhook(_) => Some(NodeType::Webhook),
            NodeData::Code(_) => Some(NodeType::Code),
            NodeData::Http(_) => Some(NodeType::Http),
            NodeData::Smtp(_) => Some(NodeType::Smtp),
            NodeData::Other(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NodeData::Webhook(d) => Some(&d.name),
            NodeData::Code(d) => Some(&d.name),
            NodeData::Http(d) => Some(&d.name),
            NodeData::Smtp(d) => Some(&d.name),
            NodeData::Other(map) => map.get("name").and_then(Value::as_str),
        }
    }

    /// One-line description shown under the node title.
    pub fn caption(&self) -> String {
        match self {
            NodeData::Webhook(d) => format!("{} {}", method_name(&d.method), d.path),
            NodeData::Code(d) => format!("{} • {}", d.language, d.name),
            NodeData::Http(d) => format!("{} {}", method_name(&d.method), d.url),
            NodeData::Smtp(d) => format!("{}:{}", d.host, d.port),
            NodeData::Other(_) => String::new(),
        }
    }

    /// Converts the typed view back into an open data mapping.
    pub fn into_map(self) -> Map<String, Value> {
        let value = match self {
            NodeData::Webhook(d) => serde_json::to_value(d),
            NodeData::Code(d) => serde_json::to_value(d),
            NodeData::Http(d) => serde_json::to_value(d),
            NodeData::Smtp(d) => serde_json::to_value(d),
            NodeData::Other(map) => return map,
        };
        // Plain structs of strings and numbers always serialize to objects.
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn method_name<M: Serialize>(method: &M) -> String {
    match serde_json::to_value(method) {
        Ok(Value::String(s)) => s,
        _ => String::new(),
    }
}
