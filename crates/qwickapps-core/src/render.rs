//! Static HTML rendering of node trees.
//!
//! Component elements are expanded through [`ViewComponent::render`] until
//! only host elements remain; those are written out as HTML.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::props::{Element, ElementType, Node, PropValue};
use crate::view::RenderContext;

/// Elements written without a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["img", "input", "br", "hr", "meta", "link"];

/// Style properties whose numeric values take no unit.
const UNITLESS_PROPERTIES: [&str; 7] = [
    "flexGrow",
    "flex",
    "opacity",
    "zIndex",
    "fontWeight",
    "lineHeight",
    "order",
];

/// Tag and attribute names written verbatim into markup.
static HTML_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("Invalid HTML name regex"));

/// Whether `name` is safe to emit as a tag or attribute name.
pub(crate) fn is_html_name(name: &str) -> bool {
    HTML_NAME_RE.is_match(name)
}

/// Render a tree to an HTML string.
pub fn render_to_html(node: &Node, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node, ctx);
    out
}

fn write_node(out: &mut String, node: &Node, ctx: &RenderContext<'_>) {
    match node {
        Node::Null | Node::Bool(_) => {}
        Node::Number(n) => out.push_str(&n.to_string()),
        Node::Text(s) => out.push_str(&html_escape(s)),
        Node::List(items) => {
            for item in items {
                write_node(out, item, ctx);
            }
        }
        Node::Element(el) => match &el.ty {
            ElementType::Component(component) => {
                let expanded = component.render(&el.props, ctx);
                write_node(out, &expanded, ctx);
            }
            ElementType::Intrinsic(tag) => write_element(out, tag, el, ctx),
        },
    }
}

fn write_element(out: &mut String, tag: &str, el: &Element, ctx: &RenderContext<'_>) {
    let tag = if is_html_name(tag) {
        tag
    } else {
        tracing::warn!("Rendering invalid tag name {:?} as div", tag);
        "div"
    };

    out.push('<');
    out.push_str(tag);

    for (key, value) in &el.props {
        if matches!(key.as_str(), "children" | "sx" | "style") {
            continue;
        }
        let PropValue::Json(value) = value else {
            continue;
        };
        write_attribute(out, key, value);
    }

    let style = inline_style(el);
    if !style.is_empty() {
        let _ = write!(out, " style=\"{}\"", html_escape(&style));
    }

    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }

    if let Some(children) = el.props.get("children") {
        write_node(out, &children.to_node(), ctx);
    }

    let _ = write!(out, "</{tag}>");
}

fn write_attribute(out: &mut String, key: &str, value: &Value) {
    if !is_html_name(key) {
        tracing::warn!("Skipping invalid attribute name {:?}", key);
        return;
    }
    let name = attribute_name(key);
    let aria_like = key.starts_with("aria-") || key.starts_with("data-");

    match value {
        Value::Null | Value::Object(_) | Value::Array(_) => {}
        Value::Bool(b) if aria_like => {
            let _ = write!(out, " {name}=\"{b}\"");
        }
        Value::Bool(true) => {
            out.push(' ');
            out.push_str(name);
        }
        Value::Bool(false) => {}
        Value::Number(n) => {
            let _ = write!(out, " {name}=\"{n}\"");
        }
        Value::String(s) => {
            let _ = write!(out, " {name}=\"{}\"", html_escape(s));
        }
    }
}

fn attribute_name(key: &str) -> &str {
    match key {
        "className" => "class",
        "htmlFor" => "for",
        "tabIndex" => "tabindex",
        other => other,
    }
}

/// `sx` merged with `style` (style wins) as a CSS declaration list.
fn inline_style(el: &Element) -> String {
    let mut merged = Map::new();
    for key in ["sx", "style"] {
        if let Some(Value::Object(map)) = el.props.get(key).and_then(PropValue::as_json) {
            for (k, v) in map {
                merged.insert(k.clone(), v.clone());
            }
        }
    }

    merged
        .iter()
        .filter_map(|(property, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) if UNITLESS_PROPERTIES.contains(&property.as_str()) => {
                    n.to_string()
                }
                Value::Number(n) => format!("{n}px"),
                _ => return None,
            };
            Some(format!("{}:{}", kebab_case(property), value))
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape HTML special characters including single quotes.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
