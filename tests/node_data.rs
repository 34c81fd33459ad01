//! Tests for typed node data views and node defaults.
mod common;
use common::*;
use flowdraft::flow::{BodyMode, HttpMethod, NodeData, WebhookMethod, default_node_data, uid};
use flowdraft::prelude::*;
use serde_json::json;

#[test]
fn test_default_node_data_matches_editor_defaults() {
    assert_eq!(
        serde_json::Value::Object(default_node_data(&NodeType::Webhook)),
        json!({"name": "Webhook", "method": "POST", "path": "/inbound"})
    );
    assert_eq!(
        serde_json::Value::Object(default_node_data(&NodeType::Code)),
        json!({"name": "Code", "language": "JavaScript", "code": "// write code here\n"})
    );
    assert_eq!(
        serde_json::Value::Object(default_node_data(&NodeType::Http)),
        json!({"name": "HTTP Request", "method": "GET", "url": "https://api.example.com", "headers": [], "bodyMode": "none"})
    );
    assert_eq!(
        serde_json::Value::Object(default_node_data(&NodeType::Smtp)),
        json!({"name": "SMTP", "host": "smtp.example.com", "port": 587, "username": "", "from": "", "to": "", "subject": "", "text": "", "html": ""})
    );
    assert!(default_node_data(&NodeType::parse("custom")).is_empty());
}

#[test]
fn test_typed_view_ignores_label_and_fills_defaults() {
    let map = data(json!({"label": "Shown", "method": "GET"}));
    match NodeData::from_map(&NodeType::Webhook, &map).expect("webhook data") {
        NodeData::Webhook(hook) => {
            assert_eq!(hook.method, WebhookMethod::Get);
            assert_eq!(hook.path, "/inbound");
            assert_eq!(hook.name, "Webhook");
        }
        other => panic!("expected webhook data, got {:?}", other),
    }
}

#[test]
fn test_http_view_reads_headers_and_body() {
    let map = data(json!({
        "name": "Create",
        "method": "POST",
        "url": "https://example.com/items",
        "headers": [{"key": "Accept", "value": "application/json"}],
        "bodyMode": "json",
        "body": "{\"a\":1}"
    }));
    let NodeData::Http(http) = NodeData::from_map(&NodeType::Http, &map).unwrap() else {
        panic!("expected http data");
    };
    assert_eq!(http.method, HttpMethod::Post);
    assert_eq!(http.body_mode, BodyMode::Json);
    assert_eq!(http.headers[0].key, "Accept");
    assert_eq!(http.body.as_deref(), Some("{\"a\":1}"));

    let caption = NodeData::Http(http).caption();
    assert_eq!(caption, "POST https://example.com/items");
}

#[test]
fn test_wrong_field_type_is_a_codec_error() {
    let map = data(json!({"port": "not a number"}));
    let err = NodeData::from_map(&NodeType::Smtp, &map).unwrap_err();
    assert!(matches!(err, CodecError::NodeData { ref kind, .. } if kind == "smtp"));
}

#[test]
fn test_unknown_kind_keeps_data_verbatim() {
    let map = data(json!({"channel": "#ops", "name": "Slack"}));
    let typed = NodeData::from_map(&NodeType::parse("slack"), &map).unwrap();
    assert_eq!(typed.kind(), None);
    assert_eq!(typed.name(), Some("Slack"));
    assert_eq!(typed.into_map(), map);
}

#[test]
fn test_smtp_caption() {
    let typed = NodeData::defaults(&NodeType::Smtp);
    assert_eq!(typed.caption(), "smtp.example.com:587");
    assert_eq!(typed.kind(), Some(NodeType::Smtp));
}

#[test]
fn test_node_type_names() {
    for kind in NodeType::KNOWN {
        assert_eq!(NodeType::parse(kind.as_str()), kind);
        assert!(kind.is_known());
    }
    assert!(!NodeType::parse("ftp").is_known());
}

#[test]
fn test_uid_shape() {
    let id = uid("n");
    let (prefix, rest) = id.split_once('_').expect("prefix separator");
    assert_eq!(prefix, "n");
    assert_eq!(rest.len(), 7);
    assert!(rest.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}
