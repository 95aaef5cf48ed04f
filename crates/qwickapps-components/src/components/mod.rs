//! Concrete views and the host-element helpers they share.

pub mod button;
pub mod code;
pub mod image;
pub mod layout;
pub mod text;
pub mod text_input;

use serde_json::{Map, Value};

use qwickapps_core::{Element, GridProps, PropValue, ViewProps};

/// Host element carrying the view's html attributes and styles.
///
/// `class` is prepended to any caller-supplied `className`.
pub(crate) fn host(tag: &str, class: &str, props: &ViewProps) -> Element {
    let mut el = Element::intrinsic(tag);
    el.props = props.host_props();

    let class_name = match props.str("className") {
        Some(extra) if !extra.trim().is_empty() => format!("{class} {}", extra.trim()),
        _ => class.to_string(),
    };
    el.props.insert("className".to_string(), PropValue::from(class_name));
    el
}

/// Add style entries under `sx`, keeping any the caller already set.
pub(crate) fn with_default_styles(mut el: Element, defaults: Map<String, Value>) -> Element {
    let mut sx = defaults;
    if let Some(Value::Object(existing)) = el.props.get("sx").and_then(PropValue::as_json) {
        for (k, v) in existing {
            sx.insert(k.clone(), v.clone());
        }
    }
    if !sx.is_empty() {
        el.props.insert("sx".to_string(), PropValue::Json(Value::Object(sx)));
    }
    el
}

/// `data-xs` .. `data-xl` attributes for each breakpoint that has a value.
pub(crate) fn with_grid_attributes(mut el: Element, grid: Option<&GridProps>) -> Element {
    let Some(grid) = grid else {
        return el;
    };
    for (breakpoint, value) in grid.breakpoints() {
        if let Some(value) = value {
            el.props
                .insert(format!("data-{breakpoint}"), PropValue::from(value.to_string()));
        }
    }
    el
}
