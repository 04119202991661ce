//! Request helpers shared by the bridge and the hooks

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::types::HostResult;

/// Extract hook arguments from `hooks/call` params
pub fn extract_arguments(params: &Value) -> Value {
    params
        .get("arguments")
        .cloned()
        .unwrap_or(Value::Object(Map::new()))
}

/// Extract the hook name from `hooks/call` params
pub fn extract_hook_name(params: &Value) -> Option<&str> {
    params.get("name").and_then(|v| v.as_str())
}

/// Build a text content response
pub fn text_response(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}

/// Build a structured response carrying `data` alongside a text line
pub fn data_response<T: Serialize>(status: &str, text: String, data: &T) -> HostResult<Value> {
    Ok(json!({
        "status": status,
        "content": [{
            "type": "text",
            "text": text
        }],
        "data": serde_json::to_value(data)?
    }))
}

/// Build a refusal response; not a transport error
pub fn error_response(status: &str, message: String) -> Value {
    json!({
        "status": status,
        "content": [{
            "type": "text",
            "text": message
        }],
        "isError": true
    })
}
