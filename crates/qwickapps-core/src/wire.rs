//! Wire format for serialized component trees.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker tag for nodes that are not registered components.
pub const OPAQUE_NODE_TAG: &str = "__react_node__";

/// One serialized component: `{ "tagName", "version", "data" }`.
///
/// `data` defaults to empty so a document missing it still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNode {
    pub tag_name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub data: Map<String, Value>,
}

impl SerializedNode {
    pub fn new(tag_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            version: version.into(),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }
}

impl From<SerializedNode> for Value {
    fn from(node: SerializedNode) -> Self {
        let mut map = Map::new();
        map.insert("tagName".to_string(), Value::String(node.tag_name));
        map.insert("version".to_string(), Value::String(node.version));
        map.insert("data".to_string(), Value::Object(node.data));
        Value::Object(map)
    }
}

/// Placeholder for a node that cannot be reconstructed.
pub fn opaque_node(type_name: &str) -> Value {
    let mut map = Map::new();
    map.insert("tag".to_string(), Value::from(OPAQUE_NODE_TAG));
    map.insert("type".to_string(), Value::from(type_name));
    Value::Object(map)
}

/// Whether a JSON value is an opaque placeholder.
pub fn is_opaque_node(value: &Value) -> bool {
    value.get("tag").and_then(Value::as_str) == Some(OPAQUE_NODE_TAG)
}

/// Whether a JSON value has the shape of a serialized component or placeholder.
pub fn is_node_object(value: &Value) -> bool {
    value.get("tagName").is_some_and(Value::is_string) || is_opaque_node(value)
}

/// Errors raised while turning documents back into trees.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Tag name mismatch: expected {expected}, got {found}")]
    TagMismatch { expected: String, found: String },

    #[error("Unknown component tag: {0}")]
    UnknownTag(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid node: {0}")]
    InvalidNode(String),
}
