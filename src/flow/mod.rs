//! The persisted flow representation and the codec between it and the canvas.

pub mod conversion;
pub mod defaults;
pub mod definition;
pub mod integrity;
pub mod node_data;
pub mod summary;
pub mod validate;

pub use conversion::*;
pub use defaults::*;
pub use definition::*;
pub use integrity::*;
pub use node_data::*;
pub use summary::*;
pub use validate::*;

use serde_json::Value;

/// Loose truthiness of a JSON value: `null`, `false`, `0` and `""` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings as-is, anything else as its JSON text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
