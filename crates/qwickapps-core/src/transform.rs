//! Tree transformer: whole component trees to and from JSON documents.
//!
//! Registered components serialize through their own `to_json`. Children that
//! contain elements are embedded as a JSON *string* holding the child
//! document (a single node object, or an array for a sequence of children).
//! Plain text and number children stay inline. Anything that is not a
//! registered component becomes an opaque `__react_node__` placeholder.

use serde::Deserialize;
use serde_json::Value;

use crate::props::{Element, ElementType, Node};
use crate::registry::ComponentRegistry;
use crate::render::is_html_name;
use crate::wire::{
    is_node_object, is_opaque_node, opaque_node, SerializedNode, TransformError,
};

/// Serializes and deserializes trees against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> Transformer<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ComponentRegistry {
        self.registry
    }

    /// Serialize a tree to JSON text. Anything but an element serializes as `null`.
    pub fn serialize(&self, node: &Node) -> String {
        self.serialize_value(node).to_string()
    }

    /// Serialize a tree to a JSON value.
    pub fn serialize_value(&self, node: &Node) -> Value {
        match node {
            Node::Element(el) => self.encode_element(el),
            _ => Value::Null,
        }
    }

    /// Parse JSON text and rebuild the tree it describes.
    pub fn deserialize(&self, text: &str) -> Result<Node, TransformError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| TransformError::MalformedDocument(e.to_string()))?;
        self.deserialize_value(&value)
    }

    /// Rebuild a tree from a parsed document.
    ///
    /// `null` yields [`Node::Null`], an array yields a list, and an object
    /// must be a serialized component or a placeholder.
    pub fn deserialize_value(&self, value: &Value) -> Result<Node, TransformError> {
        match value {
            Value::Null => Ok(Node::Null),
            Value::Object(_) if is_opaque_node(value) => Ok(opaque_element(value)),
            Value::Object(_) => self.decode_component(value),
            Value::Array(items) => items
                .iter()
                .map(|item| self.decode_item(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::List),
            other => Err(TransformError::InvalidNode(format!(
                "expected a component object or null, found {}",
                json_kind(other)
            ))),
        }
    }

    /// Decode a `data.children` value written by [`serialize`](Self::serialize).
    pub fn decode_children(&self, value: &Value) -> Result<Node, TransformError> {
        match value {
            Value::String(s) => match embedded_document(s) {
                Some(doc) => self.decode_item(&doc),
                None => Ok(Node::Text(s.clone())),
            },
            other => self.decode_item(other),
        }
    }

    fn encode_element(&self, el: &Element) -> Value {
        let class = match &el.ty {
            ElementType::Component(c) => self.registry.get(c.tag_name()),
            ElementType::Intrinsic(_) => None,
        };

        match class {
            Some(class) => class
                .to_json_with(&el.props, &|node| self.encode_embedded(node))
                .into(),
            None => {
                tracing::debug!("Serializing unregistered node {} as placeholder", el.tag_name());
                opaque_node(el.tag_name())
            }
        }
    }

    /// Encoding for a node-valued prop: element-bearing content becomes an
    /// embedded document string, primitives stay inline.
    fn encode_embedded(&self, node: &Node) -> Option<Value> {
        match node {
            Node::Null => None,
            _ if node.contains_element() => Some(Value::String(self.encode_item(node).to_string())),
            Node::Text(s) => Some(encode_text(s)),
            other => Some(self.encode_item(other)),
        }
    }

    fn encode_item(&self, node: &Node) -> Value {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::Text(s) => Value::String(s.clone()),
            Node::Element(el) => self.encode_element(el),
            Node::List(items) => Value::Array(items.iter().map(|i| self.encode_item(i)).collect()),
        }
    }

    fn decode_component(&self, value: &Value) -> Result<Node, TransformError> {
        let node = SerializedNode::deserialize(value)
            .map_err(|e| TransformError::InvalidNode(e.to_string()))?;
        let class = self
            .registry
            .get(&node.tag_name)
            .ok_or_else(|| TransformError::UnknownTag(node.tag_name.clone()))?;

        class.from_json(&node, self.registry).map(Node::Element)
    }

    fn decode_item(&self, value: &Value) -> Result<Node, TransformError> {
        match value {
            Value::Null => Ok(Node::Null),
            Value::Bool(b) => Ok(Node::Bool(*b)),
            Value::Number(n) => Ok(Node::Number(n.clone())),
            Value::String(s) => Ok(Node::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| self.decode_item(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::List),
            Value::Object(_) if is_node_object(value) => self.deserialize_value(value),
            Value::Object(_) => {
                tracing::warn!("Dropping child that is neither text nor a serialized component");
                Ok(Node::Null)
            }
        }
    }
}

/// Encode a text child so that [`Transformer::decode_children`] reads it
/// back as the same text.
///
/// Text that would parse as an embedded document is written as a quoted
/// JSON string literal instead.
pub(crate) fn encode_text(s: &str) -> Value {
    if embedded_document(s).is_some() {
        Value::String(Value::String(s.to_string()).to_string())
    } else {
        Value::String(s.to_string())
    }
}

/// Parse an embedded child document, if `s` is one.
///
/// A quoted JSON string literal is escaped text and decodes to its contents.
fn embedded_document(s: &str) -> Option<Value> {
    let trimmed = s.trim_start();
    if !trimmed.starts_with(['{', '[', '"']) {
        return None;
    }

    let doc: Value = serde_json::from_str(s).ok()?;
    let is_document = match &doc {
        Value::String(_) => true,
        Value::Array(items) => items.iter().any(is_node_object),
        other => is_node_object(other),
    };
    is_document.then_some(doc)
}

/// Placeholders come back as empty host elements of the recorded type.
///
/// A type that is not a plain element name falls back to `div`.
fn opaque_element(value: &Value) -> Node {
    let ty = match value.get("type").and_then(Value::as_str) {
        Some(ty) if is_html_name(ty) => ty,
        Some(ty) => {
            tracing::warn!("Placeholder type {:?} is not an element name, using div", ty);
            "div"
        }
        None => "div",
    };
    Node::Element(Element::intrinsic(ty))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{props_from_value, PropValue, Props};
    use crate::view::{create_view, ChildrenStrategy, ViewComponent, ViewConfig, ViewProps, ViewRole};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn blank(_: ViewProps) -> Node {
        Node::Null
    }

    fn text_view() -> Arc<ViewComponent> {
        create_view(ViewConfig::new("Text", "1.0.0", blank).children(ChildrenStrategy::content()))
            .unwrap()
    }

    fn container_view() -> Arc<ViewComponent> {
        create_view(ViewConfig::new("Container", "1.0.0", blank).role(ViewRole::Container)).unwrap()
    }

    fn registry() -> ComponentRegistry {
        ComponentRegistry::new()
            .with(text_view())
            .with(container_view())
    }

    fn text(content: &str) -> Node {
        Node::Element(text_view().element(props_from_value(&json!({"content": content}))))
    }

    fn container(children: Node) -> Node {
        let mut props = Props::new();
        props.insert("children".into(), PropValue::Node(children));
        Node::Element(container_view().element(props))
    }

    fn round_trip(registry: &ComponentRegistry, node: &Node) -> (String, Node) {
        let transformer = Transformer::new(registry);
        let text = transformer.serialize(node);
        let back = transformer.deserialize(&text).unwrap();
        (text, back)
    }

    #[test]
    fn non_elements_serialize_to_null() {
        let registry = registry();
        let transformer = Transformer::new(&registry);

        assert_eq!(transformer.serialize(&Node::Null), "null");
        assert_eq!(transformer.serialize(&Node::text("plain")), "null");
        assert_eq!(transformer.deserialize("null").unwrap(), Node::Null);
    }

    #[test]
    fn serializes_registered_component() {
        let registry = registry();

        let value = Transformer::new(&registry).serialize_value(&text("Hello"));

        assert_eq!(
            value,
            json!({"tagName": "Text", "version": "1.0.0", "data": {"content": "Hello"}})
        );
    }

    #[test]
    fn single_child_is_embedded_as_object() {
        let registry = registry();
        let tree = container(text("only"));

        let value = Transformer::new(&registry).serialize_value(&tree);
        let embedded = value["data"]["children"].as_str().unwrap();
        let doc: Value = serde_json::from_str(embedded).unwrap();

        assert_eq!(doc["tagName"], json!("Text"));

        let (_, back) = round_trip(&registry, &tree);
        let children = back.as_element().unwrap().children().unwrap();
        assert!(matches!(children, Node::Element(_)));
        assert_eq!(back, tree);
    }

    #[test]
    fn child_sequences_stay_sequences() {
        let registry = registry();
        let tree = container(Node::list([text("one")]));

        let value = Transformer::new(&registry).serialize_value(&tree);
        let doc: Value = serde_json::from_str(value["data"]["children"].as_str().unwrap()).unwrap();
        assert!(doc.is_array());

        let (_, back) = round_trip(&registry, &tree);
        assert_eq!(back, tree);
    }

    #[test]
    fn text_children_stay_inline() {
        let registry = registry();
        let tree = container(Node::text("hi"));

        let value = Transformer::new(&registry).serialize_value(&tree);

        assert_eq!(value["data"]["children"], json!("hi"));
        assert_eq!(round_trip(&registry, &tree).1, tree);
    }

    #[test]
    fn json_looking_text_is_not_a_document() {
        let registry = registry();
        let tree = container(Node::text("[1, 2]"));

        assert_eq!(round_trip(&registry, &tree).1, tree);
    }

    #[test]
    fn document_looking_text_stays_text() {
        let registry = registry();
        let transformer = Transformer::new(&registry);
        let texts = [
            r#"{"tagName":"Carousel"}"#,
            r#"{"tagName":"Text","version":"1.0.0","data":{"content":"x"}}"#,
            r#"[{"tag":"__react_node__","type":"hr"}]"#,
            r#"{"tag":"__react_node__","type":"div"}"#,
            r#""hi""#,
            r#"  "padded""#,
        ];

        for raw in texts {
            let tree = container(Node::text(raw));
            let (first, back) = round_trip(&registry, &tree);

            assert_eq!(back, tree, "{raw}");
            assert_eq!(transformer.serialize(&back), first, "{raw}");
        }
    }

    #[test]
    fn escaped_text_is_a_json_string_literal() {
        let registry = registry();
        let tree = container(Node::text(r#"{"tagName":"Text"}"#));

        let value = Transformer::new(&registry).serialize_value(&tree);

        assert_eq!(value["data"]["children"], json!(r#""{\"tagName\":\"Text\"}""#));
    }

    #[test]
    fn to_json_escapes_document_looking_text() {
        let registry = registry();
        let mut props = Props::new();
        props.insert("children".into(), PropValue::from(r#"{"tagName":"Text"}"#));

        let node = container_view().to_json(&props);
        let back = container_view().from_json(&node, &registry).unwrap();

        assert_eq!(back.children(), Some(Node::text(r#"{"tagName":"Text"}"#)));
    }

    #[test]
    fn placeholder_types_must_be_element_names() {
        let registry = registry();

        let node = Transformer::new(&registry)
            .deserialize_value(&json!({"tag": "__react_node__", "type": "img src=x onerror=alert(1)"}))
            .unwrap();

        assert_eq!(node.as_element().map(Element::tag_name), Some("div"));
    }

    #[test]
    fn mixed_children_round_trip() {
        let registry = registry();
        let tree = container(Node::list([
            Node::text("intro "),
            text("registered"),
            Node::Element(Element::intrinsic("hr")),
            Node::Number(3.into()),
        ]));

        let (first, back) = round_trip(&registry, &tree);
        let second = Transformer::new(&registry).serialize(&back);

        assert_eq!(first, second);
        let children = back.as_element().unwrap().children().unwrap();
        let Node::List(items) = children else {
            panic!("expected a list of children");
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[2].as_element().map(Element::tag_name), Some("hr"));
    }

    #[test]
    fn unregistered_components_become_placeholders() {
        let stray = create_view(ViewConfig::new("Stray", "1.0.0", blank)).unwrap();
        let registry = registry();

        let value = Transformer::new(&registry)
            .serialize_value(&Node::Element(stray.element(Props::new())));

        assert_eq!(value, json!({"tag": "__react_node__", "type": "Stray"}));
    }

    #[test]
    fn unknown_tags_are_fatal() {
        let registry = registry();
        let transformer = Transformer::new(&registry);

        let err = transformer
            .deserialize(r#"{"tagName": "Carousel", "version": "1.0.0", "data": {}}"#)
            .unwrap_err();
        assert!(matches!(err, TransformError::UnknownTag(tag) if tag == "Carousel"));

        let nested = json!({
            "tagName": "Container",
            "version": "1.0.0",
            "data": {"children": r#"{"tagName": "Carousel", "version": "1.0.0", "data": {}}"#},
        });
        assert!(matches!(
            transformer.deserialize_value(&nested),
            Err(TransformError::UnknownTag(_))
        ));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let registry = registry();
        let transformer = Transformer::new(&registry);

        assert!(matches!(
            transformer.deserialize("{not json"),
            Err(TransformError::MalformedDocument(_))
        ));
        assert!(matches!(
            transformer.deserialize("42"),
            Err(TransformError::InvalidNode(_))
        ));
    }

    #[test]
    fn missing_data_degrades_gracefully() {
        let registry = registry();

        let node = Transformer::new(&registry)
            .deserialize(r#"{"tagName": "Text", "version": "1.0.0"}"#)
            .unwrap();

        assert_eq!(node.as_element().map(Element::tag_name), Some("Text"));
    }

    #[test]
    fn deep_trees_round_trip() {
        let registry = registry();
        let mut tree = text("leaf");
        for _ in 0..64 {
            tree = container(tree);
        }

        let (first, back) = round_trip(&registry, &tree);

        assert_eq!(back, tree);
        assert_eq!(Transformer::new(&registry).serialize(&back), first);
    }

    #[test]
    fn null_children_do_not_panic() {
        let registry = registry();
        let tree = container(Node::list([Node::Null, text("x"), Node::Null]));

        let (_, back) = round_trip(&registry, &tree);

        assert_eq!(back, tree);
    }
}
