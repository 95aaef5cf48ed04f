//! Splits normalized props into grid, style, html and rest buckets.

use serde_json::{Map, Value};

use crate::handlers::EVENT_HANDLER_PROPS;
use crate::normalize::GRID_PROPS;
use crate::props::{PropValue, Props};
use crate::resolve::{resolve_dimension, resolve_grid, resolve_spacing, Axis, Dimension, GridProps};

/// Width/height-like props resolved through the dimension tables.
pub const DIMENSION_PROPS: [&str; 6] = [
    "width",
    "height",
    "minWidth",
    "maxWidth",
    "minHeight",
    "maxHeight",
];

/// Padding/margin props resolved through the spacing table.
pub const SPACING_PROPS: [&str; 14] = [
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "paddingX",
    "paddingY",
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    "marginX",
    "marginY",
];

/// Plain HTML attributes forwarded to the host element.
pub const HTML_ATTRIBUTES: [&str; 8] = [
    "id",
    "className",
    "role",
    "title",
    "tabIndex",
    "hidden",
    "lang",
    "dir",
];

const STYLE_SOURCE_PROPS: [&str; 4] = ["background", "textAlign", "sx", "style"];

/// Whether `key` is forwarded to the host element as an attribute or handler.
pub fn is_html_prop(key: &str) -> bool {
    HTML_ATTRIBUTES.contains(&key)
        || EVENT_HANDLER_PROPS.contains(&key)
        || key.starts_with("aria-")
        || key.starts_with("data-")
}

/// Normalized props partitioned for a view renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseProps {
    /// Grid breakpoints, `None` when no grid prop was given
    pub grid_props: Option<GridProps>,

    /// `sx` (merged style object) and `style` (passthrough)
    pub style_props: Props,

    /// HTML/ARIA attributes and event handlers
    pub html_props: Props,

    /// Everything else
    pub rest_props: Props,
}

/// Partition normalized props. Pure; the input is not modified.
pub fn resolve_base_props(props: &Props) -> BaseProps {
    let mut sx = Map::new();

    for key in DIMENSION_PROPS {
        let Some(value) = props.get(key).and_then(PropValue::as_json) else {
            continue;
        };
        match resolve_dimension(value, Axis::for_prop(key)) {
            Some(Dimension::Css(css)) => {
                sx.insert(key.to_string(), css);
            }
            Some(Dimension::Grow) => {
                sx.insert("flexGrow".to_string(), Value::from(1));
            }
            None => {}
        }
    }

    for key in SPACING_PROPS {
        let Some(resolved) = props
            .get(key)
            .and_then(PropValue::as_json)
            .and_then(resolve_spacing)
        else {
            continue;
        };
        for property in expand_axis(key) {
            sx.insert(property, resolved.clone());
        }
    }

    for key in ["background", "textAlign"] {
        if let Some(value) = props.get(key).and_then(PropValue::as_json) {
            if !value.is_null() {
                sx.insert(key.to_string(), value.clone());
            }
        }
    }

    // Caller-supplied sx is applied last so it wins on conflicts.
    if let Some(Value::Object(caller)) = props.get("sx").and_then(PropValue::as_json) {
        for (k, v) in caller {
            sx.insert(k.clone(), v.clone());
        }
    }

    let mut style_props = Props::new();
    if !sx.is_empty() {
        style_props.insert("sx".to_string(), PropValue::Json(Value::Object(sx)));
    }
    if let Some(style) = props.get("style") {
        style_props.insert("style".to_string(), style.clone());
    }

    let mut html_props = Props::new();
    let mut rest_props = Props::new();
    for (key, value) in props {
        let k = key.as_str();
        if GRID_PROPS.contains(&k)
            || DIMENSION_PROPS.contains(&k)
            || SPACING_PROPS.contains(&k)
            || STYLE_SOURCE_PROPS.contains(&k)
        {
            continue;
        }
        if is_html_prop(k) {
            html_props.insert(key.clone(), value.clone());
        } else {
            rest_props.insert(key.clone(), value.clone());
        }
    }

    BaseProps {
        grid_props: resolve_grid(props),
        style_props,
        html_props,
        rest_props,
    }
}

/// `paddingX` -> `paddingLeft` + `paddingRight`; other keys map to themselves.
fn expand_axis(key: &str) -> Vec<String> {
    if let Some(base) = key.strip_suffix('X') {
        vec![format!("{base}Left"), format!("{base}Right")]
    } else if let Some(base) = key.strip_suffix('Y') {
        vec![format!("{base}Top"), format!("{base}Bottom")]
    } else {
        vec![key.to_string()]
    }
}
