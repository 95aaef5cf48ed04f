//! Prop values and the renderable node tree.
//!
//! Props are kept in a `BTreeMap` so serialized `data` maps come out in a
//! stable key order. A prop that is "undefined" is simply absent from the map;
//! an explicit `null` is `PropValue::Json(Value::Null)`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::handlers::EventHandler;
use crate::view::ViewComponent;

/// A component's props, keyed by prop name.
pub type Props = BTreeMap<String, PropValue>;

/// Build props from a JSON object. Non-object values yield empty props.
pub fn props_from_value(value: &Value) -> Props {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), PropValue::Json(v.clone())))
                .collect()
        })
        .unwrap_or_default()
}

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Any JSON-safe value, including an explicit `null`.
    Json(Value),
    /// An event handler together with its persisted source.
    Handler(EventHandler),
    /// A plain function prop. Never serialized.
    Callback(Callback),
    /// Nested renderable content (usually `children`).
    Node(Node),
}

impl PropValue {
    /// Get as a string slice if this is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get the underlying JSON value.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            PropValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Get as a boolean if this is a JSON boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(Value::as_bool)
    }

    /// True for an explicit `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Json(Value::Null))
    }

    /// Interpret this prop as renderable content.
    ///
    /// JSON values map onto the equivalent primitive nodes; functions have no
    /// renderable form.
    pub fn to_node(&self) -> Node {
        match self {
            PropValue::Node(node) => node.clone(),
            PropValue::Json(value) => Node::from_value(value),
            PropValue::Handler(_) | PropValue::Callback(_) => Node::Null,
        }
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Json(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Json(Value::String(value.to_string()))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Json(Value::String(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Json(Value::Bool(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Json(Value::from(value))
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Json(Value::from(value))
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Json(Value::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Json(Value::from(value))
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        PropValue::Handler(value)
    }
}

impl From<Callback> for PropValue {
    fn from(value: Callback) -> Self {
        PropValue::Callback(value)
    }
}

impl From<Node> for PropValue {
    fn from(value: Node) -> Self {
        PropValue::Node(value)
    }
}

impl From<Element> for PropValue {
    fn from(value: Element) -> Self {
        PropValue::Node(Node::Element(value))
    }
}

/// A non-event function prop (formatters, render callbacks and the like).
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl Callback {
    pub fn new(f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, arg: &Value) -> Value {
        (self.0)(arg)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A node in a renderable tree.
///
/// `List` keeps the difference between a single child and a sequence of
/// children, which serialization has to preserve.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Element(Element),
    List(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn list(items: impl IntoIterator<Item = Node>) -> Self {
        Node::List(items.into_iter().collect())
    }

    /// Build a node from a JSON value. Objects have no node form and map to `Null`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null | Value::Object(_) => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Number(n) => Node::Number(n.clone()),
            Value::String(s) => Node::Text(s.clone()),
            Value::Array(items) => Node::List(items.iter().map(Node::from_value).collect()),
        }
    }

    /// Whether this node renders nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Null | Node::Bool(false) => true,
            Node::Text(s) => s.is_empty(),
            Node::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Whether an element appears anywhere at this level or in nested lists.
    pub fn contains_element(&self) -> bool {
        match self {
            Node::Element(_) => true,
            Node::List(items) => items.iter().any(Node::contains_element),
            _ => false,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

/// What kind of thing an element instantiates.
#[derive(Clone)]
pub enum ElementType {
    /// A serializable view component.
    Component(Arc<ViewComponent>),
    /// A plain host element such as `div`.
    Intrinsic(String),
}

impl ElementType {
    pub fn name(&self) -> &str {
        match self {
            ElementType::Component(c) => c.tag_name(),
            ElementType::Intrinsic(tag) => tag,
        }
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Component(c) => write!(f, "Component({}@{})", c.tag_name(), c.version()),
            ElementType::Intrinsic(tag) => write!(f, "Intrinsic({tag})"),
        }
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ElementType::Component(a), ElementType::Component(b)) => {
                Arc::ptr_eq(a, b) || (a.tag_name() == b.tag_name() && a.version() == b.version())
            }
            (ElementType::Intrinsic(a), ElementType::Intrinsic(b)) => a == b,
            _ => false,
        }
    }
}

/// An instantiated element: a type plus its props (children included).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub ty: ElementType,
    pub props: Props,
}

impl Element {
    /// Create a plain host element.
    pub fn intrinsic(tag: impl Into<String>) -> Self {
        Self {
            ty: ElementType::Intrinsic(tag.into()),
            props: Props::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Append a child. The first child is stored as a single node; adding a
    /// second turns `children` into a list.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        let child = child.into();
        let children = match self.props.remove("children").map(|p| p.to_node()) {
            None | Some(Node::Null) => child,
            Some(Node::List(mut items)) => {
                items.push(child);
                Node::List(items)
            }
            Some(existing) => Node::List(vec![existing, child]),
        };
        self.props
            .insert("children".to_string(), PropValue::Node(children));
        self
    }

    /// Set `children` to a sequence, even if it has a single item.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.props
            .insert("children".to_string(), PropValue::Node(Node::list(children)));
        self
    }

    pub fn children(&self) -> Option<Node> {
        self.props.get("children").map(PropValue::to_node)
    }

    /// Component tag name or host tag.
    pub fn tag_name(&self) -> &str {
        self.ty.name()
    }
}

/// Flatten a node to its text content.
///
/// Concatenates text and number leaves in document order, skips booleans and
/// nulls, and descends into element `children` and lists at any depth.
pub fn text_content(node: &Node) -> String {
    TextLeaves::new(node).collect()
}

/// Lazy iterator over the text leaves of a tree.
///
/// Uses an explicit stack, so deep trees do not grow the call stack.
pub struct TextLeaves<'a> {
    stack: Vec<Leaf<'a>>,
}

enum Leaf<'a> {
    Node(&'a Node),
    Json(&'a Value),
}

impl<'a> TextLeaves<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self {
            stack: vec![Leaf::Node(node)],
        }
    }

    fn push_prop(&mut self, prop: &'a PropValue) {
        match prop {
            PropValue::Node(node) => self.stack.push(Leaf::Node(node)),
            PropValue::Json(value) => self.stack.push(Leaf::Json(value)),
            PropValue::Handler(_) | PropValue::Callback(_) => {}
        }
    }
}

impl<'a> Iterator for TextLeaves<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(leaf) = self.stack.pop() {
            match leaf {
                Leaf::Node(Node::Text(s)) => return Some(Cow::Borrowed(s)),
                Leaf::Node(Node::Number(n)) => return Some(Cow::Owned(n.to_string())),
                Leaf::Node(Node::List(items)) => {
                    self.stack.extend(items.iter().rev().map(Leaf::Node));
                }
                Leaf::Node(Node::Element(el)) => {
                    if let Some(children) = el.props.get("children") {
                        self.push_prop(children);
                    }
                }
                Leaf::Node(Node::Null | Node::Bool(_)) => {}
                Leaf::Json(Value::String(s)) => return Some(Cow::Borrowed(s)),
                Leaf::Json(Value::Number(n)) => return Some(Cow::Owned(n.to_string())),
                Leaf::Json(Value::Array(items)) => {
                    self.stack.extend(items.iter().rev().map(Leaf::Json));
                }
                Leaf::Json(Value::Null | Value::Bool(_) | Value::Object(_)) => {}
            }
        }
        None
    }
}
