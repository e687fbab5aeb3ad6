//! Non-destructive assembly of the per-locale message tree.

use serde_json::{
    Map,
    Value,
};

use super::chapters::ChapterBundle;

/// Root-level key that receives the chapter bundle.
pub const CONTENT_KEY: &str = "content";

/// Returns `root` with `content` extended by `bundle`.
///
/// Keys already under `content` are never replaced; only absent chapter keys
/// are added. Every other root key is passed through unchanged. A `content`
/// value that is not an object is treated as absent.
#[must_use]
pub fn merge_content(root: &Value, bundle: &ChapterBundle) -> Value {
    let mut merged_root = match root {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    let mut content = match merged_root.remove(CONTENT_KEY) {
        Some(Value::Object(existing)) => existing,
        Some(other) => {
            tracing::warn!(found = %type_name(&other), "`content` is not an object, replacing it");
            Map::new()
        }
        None => Map::new(),
    };

    for (field, value) in bundle.iter() {
        if content.contains_key(field.key()) {
            tracing::trace!(field = field.key(), "Keeping hand-authored content entry");
            continue;
        }
        content.insert(field.key().to_string(), value.clone());
    }

    merged_root.insert(CONTENT_KEY.to_string(), Value::Object(content));
    Value::Object(merged_root)
}

/// JSON type name for conflict logs.
const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
