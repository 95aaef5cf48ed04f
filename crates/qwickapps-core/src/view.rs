//! Serializable view factory.
//!
//! [`create_view`] wraps a pure renderer with prop normalization, optional
//! data binding and base-props resolution, and gives the resulting component
//! a `to_json`/`from_json` pair that follows its [`ChildrenStrategy`].

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::base_props::{is_html_prop, resolve_base_props, BaseProps};
use crate::binding::{BindingOptions, BindingState, DataBinding};
use crate::handlers::{is_event_prop, HandlerCompiler, NoopCompiler};
use crate::normalize::{canonicalize, normalize_props};
use crate::props::{text_content, Element, ElementType, Node, PropValue, Props};
use crate::registry::ComponentRegistry;
use crate::resolve::GridProps;
use crate::transform::{encode_text, Transformer};
use crate::wire::{opaque_node, SerializedNode, TransformError};

/// Default prop name for content-prop components.
pub const DEFAULT_CONTENT_PROP: &str = "content";

/// Text shown while a data source is loading.
pub const LOADING_TEXT: &str = "Loading…";

/// How a component treats its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChildrenStrategy {
    /// No nested components; text lives under the named prop.
    ContentProp(String),
    /// Children are nested nodes, serialized recursively.
    #[default]
    ReactChildren,
}

impl ChildrenStrategy {
    /// Content-prop strategy using the `content` prop.
    pub fn content() -> Self {
        ChildrenStrategy::ContentProp(DEFAULT_CONTENT_PROP.to_string())
    }

    pub fn content_prop(name: impl Into<String>) -> Self {
        ChildrenStrategy::ContentProp(name.into())
    }
}

/// Whether the view receives grid props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewRole {
    #[default]
    View,
    Container,
}

/// Development renders binding errors inline; production falls back silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Development,
    Production,
}

/// Final props handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewProps {
    /// Rest, style and html props merged into one map
    pub props: Props,

    /// Grid breakpoints; only set for containers
    pub grid_props: Option<GridProps>,

    /// Children; only set for react-children views
    pub children: Option<Node>,
}

impl ViewProps {
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(PropValue::as_str)
    }

    /// Prop rendered as display text: strings as-is, numbers formatted.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.props.get(key)?.as_json()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Boolean prop, false when absent.
    pub fn flag(&self, key: &str) -> bool {
        self.props
            .get(key)
            .and_then(PropValue::as_bool)
            .unwrap_or(false)
    }

    /// Props that belong on the host element: html attributes, handlers, `sx` and `style`.
    pub fn host_props(&self) -> Props {
        self.props
            .iter()
            .filter(|(k, _)| is_html_prop(k) || *k == "sx" || *k == "style")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn take_children(&mut self) -> Node {
        self.children.take().unwrap_or_default()
    }
}

/// Renders final view props into a node tree.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, props: ViewProps) -> Node;
}

impl<F> ViewRenderer for F
where
    F: Fn(ViewProps) -> Node + Send + Sync,
{
    fn render(&self, props: ViewProps) -> Node {
        self(props)
    }
}

/// Pure transform applied to assembled props right before rendering.
pub type Finalize = Arc<dyn Fn(ViewProps) -> ViewProps + Send + Sync>;

/// Everything needed to build a view component.
pub struct ViewConfig {
    pub tag_name: String,
    pub version: String,
    pub role: ViewRole,
    pub renderer: Arc<dyn ViewRenderer>,
    pub children: ChildrenStrategy,
    pub finalize: Option<Finalize>,
}

impl ViewConfig {
    pub fn new(
        tag_name: impl Into<String>,
        version: impl Into<String>,
        renderer: impl ViewRenderer + 'static,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            version: version.into(),
            role: ViewRole::View,
            renderer: Arc::new(renderer),
            children: ChildrenStrategy::default(),
            finalize: None,
        }
    }

    pub fn role(mut self, role: ViewRole) -> Self {
        self.role = role;
        self
    }

    pub fn children(mut self, children: ChildrenStrategy) -> Self {
        self.children = children;
        self
    }

    pub fn finalize(mut self, f: impl Fn(ViewProps) -> ViewProps + Send + Sync + 'static) -> Self {
        self.finalize = Some(Arc::new(f));
        self
    }
}

/// Errors in a view configuration.
#[derive(Debug, thiserror::Error)]
pub enum ViewConfigError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid version {version:?} for {tag_name}: expected MAJOR.MINOR.PATCH")]
    InvalidVersion { tag_name: String, version: String },

    #[error("Content prop name for {0} must not be empty")]
    EmptyContentProp(String),
}

static TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.-]*$").expect("Invalid tag name regex"));

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?$").expect("Invalid version regex")
});

/// Build a serializable view component from its config.
pub fn create_view(config: ViewConfig) -> Result<Arc<ViewComponent>, ViewConfigError> {
    if !TAG_NAME_RE.is_match(&config.tag_name) {
        return Err(ViewConfigError::InvalidTagName(config.tag_name));
    }
    if !VERSION_RE.is_match(&config.version) {
        return Err(ViewConfigError::InvalidVersion {
            tag_name: config.tag_name,
            version: config.version,
        });
    }
    if let ChildrenStrategy::ContentProp(name) = &config.children {
        if name.is_empty() {
            return Err(ViewConfigError::EmptyContentProp(config.tag_name));
        }
    }

    Ok(Arc::new(ViewComponent {
        tag_name: config.tag_name,
        version: config.version,
        role: config.role,
        renderer: config.renderer,
        children: config.children,
        finalize: config.finalize,
    }))
}

/// Collaborators and settings for one render pass.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub handlers: &'a dyn HandlerCompiler,
    pub binding: Option<&'a dyn DataBinding>,
    pub mode: RenderMode,
}

impl Default for RenderContext<'static> {
    fn default() -> Self {
        Self {
            handlers: &NoopCompiler,
            binding: None,
            mode: RenderMode::default(),
        }
    }
}

impl<'a> RenderContext<'a> {
    pub fn new(handlers: &'a dyn HandlerCompiler) -> Self {
        Self {
            handlers,
            binding: None,
            mode: RenderMode::default(),
        }
    }

    pub fn with_binding(mut self, binding: &'a dyn DataBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("binding", &self.binding.is_some())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// A serializable view component class.
pub struct ViewComponent {
    tag_name: String,
    version: String,
    role: ViewRole,
    renderer: Arc<dyn ViewRenderer>,
    children: ChildrenStrategy,
    finalize: Option<Finalize>,
}

impl fmt::Debug for ViewComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewComponent")
            .field("tag_name", &self.tag_name)
            .field("version", &self.version)
            .field("role", &self.role)
            .field("children", &self.children)
            .field("finalize", &self.finalize.is_some())
            .finish_non_exhaustive()
    }
}

impl ViewComponent {
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn role(&self) -> ViewRole {
        self.role
    }

    pub fn children_strategy(&self) -> &ChildrenStrategy {
        &self.children
    }

    /// Instantiate this component with `props`.
    pub fn element(self: &Arc<Self>, props: Props) -> Element {
        Element {
            ty: ElementType::Component(Arc::clone(self)),
            props,
        }
    }

    /// Serialize props into a wire node.
    ///
    /// Nested elements inside `children` are left as opaque placeholders;
    /// [`Transformer::serialize`] encodes them properly.
    pub fn to_json(&self, props: &Props) -> SerializedNode {
        self.to_json_with(props, &inline_node)
    }

    /// Serialize props, encoding node-valued props with `encode_node`.
    pub(crate) fn to_json_with(
        &self,
        props: &Props,
        encode_node: &dyn Fn(&Node) -> Option<Value>,
    ) -> SerializedNode {
        let mut source = props.clone();
        let children = source.remove("children");

        match &self.children {
            ChildrenStrategy::ContentProp(name) => {
                if let (false, Some(children)) = (has_value(&source, name), children) {
                    let text = text_content(&children.to_node());
                    source.insert(name.clone(), PropValue::from(text));
                }
            }
            ChildrenStrategy::ReactChildren => {
                let children = children.map(|c| c.to_node()).filter(|c| !c.is_empty());
                if let Some(children) = children {
                    source.insert("children".to_string(), PropValue::Node(children));
                }
            }
        }

        let mut data = Map::new();
        for (key, value) in canonicalize(&source) {
            let wire = match value {
                PropValue::Json(Value::Null) => None,
                PropValue::Json(v) => Some(v),
                PropValue::Handler(h) if is_event_prop(&key) => Some(Value::from(h.source())),
                PropValue::Handler(_) | PropValue::Callback(_) => {
                    tracing::debug!("Dropping function prop {} from {}", key, self.tag_name);
                    None
                }
                PropValue::Node(node) => encode_node(&node),
            };
            if let Some(wire) = wire {
                data.insert(key, wire);
            }
        }

        SerializedNode::new(&self.tag_name, &self.version).with_data(data)
    }

    /// Rebuild an element from a wire node.
    ///
    /// A tag mismatch is an error; a version mismatch is logged and the data
    /// is read with this component's current schema.
    pub fn from_json(
        self: &Arc<Self>,
        node: &SerializedNode,
        registry: &ComponentRegistry,
    ) -> Result<Element, TransformError> {
        if node.tag_name != self.tag_name {
            return Err(TransformError::TagMismatch {
                expected: self.tag_name.clone(),
                found: node.tag_name.clone(),
            });
        }

        if node.version != self.version {
            tracing::warn!(
                "Version mismatch for {}: document has {:?}, component is {}",
                self.tag_name,
                node.version,
                self.version
            );
        }

        let mut props: Props = node
            .data
            .iter()
            .map(|(k, v)| (k.clone(), PropValue::Json(v.clone())))
            .collect();

        let children = props.remove("children");
        if let (ChildrenStrategy::ReactChildren, Some(PropValue::Json(encoded))) =
            (&self.children, children)
        {
            let decoded = Transformer::new(registry).decode_children(&encoded)?;
            if !decoded.is_empty() {
                props.insert("children".to_string(), PropValue::Node(decoded));
            }
        }

        Ok(self.element(props))
    }

    /// Render one instance of this component.
    pub fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> Node {
        let mut schema = props.clone();
        let data_source = schema
            .remove("dataSource")
            .and_then(|v| v.as_str().map(str::to_string));
        let options = schema
            .remove("bindingOptions")
            .map(|v| binding_options(&v))
            .unwrap_or_default();
        let children = schema.remove("children").map(|c| c.to_node());

        if let ChildrenStrategy::ContentProp(name) = &self.children {
            if let (false, Some(children)) = (has_value(&schema, name), &children) {
                schema.insert(name.clone(), PropValue::from(text_content(children)));
            }
        }

        let normalized = normalize_props(&schema, ctx.handlers);

        let bound = match (data_source.as_deref(), ctx.binding) {
            (None, _) => normalized,
            (Some(source), None) => {
                tracing::warn!(
                    "{} has dataSource {:?} but no data binding is configured",
                    self.tag_name,
                    source
                );
                normalized
            }
            (Some(source), Some(binding)) => match binding.resolve(source, &normalized, &options) {
                BindingState::Pending => return loading_placeholder(),
                BindingState::Resolved(fields) => {
                    let mut merged = normalized;
                    for (k, v) in fields {
                        merged.insert(k, PropValue::Json(v));
                    }
                    normalize_props(&merged, ctx.handlers)
                }
                BindingState::Failed(message) => {
                    tracing::error!(
                        "Data binding failed for {} ({}): {}",
                        self.tag_name,
                        source,
                        message
                    );
                    match ctx.mode {
                        RenderMode::Development => {
                            return binding_error(&self.tag_name, &message);
                        }
                        RenderMode::Production => normalized,
                    }
                }
            },
        };

        let BaseProps {
            grid_props,
            style_props,
            html_props,
            rest_props,
        } = resolve_base_props(&bound);

        let mut assembled = rest_props;
        assembled.extend(style_props);
        assembled.extend(html_props);

        let mut view_props = ViewProps {
            props: assembled,
            grid_props: match self.role {
                ViewRole::Container => grid_props,
                ViewRole::View => None,
            },
            children: None,
        };

        if let Some(finalize) = &self.finalize {
            view_props = finalize(view_props);
        }

        if self.children == ChildrenStrategy::ReactChildren {
            view_props.children = children;
        }

        self.renderer.render(view_props)
    }
}

/// An explicit `null` counts as absent.
fn has_value(props: &Props, key: &str) -> bool {
    props.get(key).is_some_and(|v| !v.is_null())
}

/// Child encoding used by `to_json`: primitives inline, elements as placeholders.
fn inline_node(node: &Node) -> Option<Value> {
    match node {
        Node::Null => None,
        Node::Text(s) => Some(encode_text(s)),
        other => Some(inline_item(other)),
    }
}

fn inline_item(node: &Node) -> Value {
    match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(n.clone()),
        Node::Text(s) => Value::String(s.clone()),
        Node::Element(el) => opaque_node(el.tag_name()),
        Node::List(items) => Value::Array(items.iter().map(inline_item).collect()),
    }
}

fn binding_options(value: &PropValue) -> BindingOptions {
    let Some(json) = value.as_json() else {
        return BindingOptions::default();
    };
    serde_json::from_value(json.clone()).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid bindingOptions: {}", e);
        BindingOptions::default()
    })
}

fn loading_placeholder() -> Node {
    Node::Element(
        Element::intrinsic("div")
            .with_prop("className", "qwickapps-loading")
            .with_prop("aria-busy", "true")
            .with_child(LOADING_TEXT),
    )
}

fn binding_error(tag_name: &str, message: &str) -> Node {
    Node::Element(
        Element::intrinsic("div")
            .with_prop("className", "qwickapps-binding-error")
            .with_prop("role", "alert")
            .with_child(format!("Error loading {tag_name}: {message}")),
    )
}
