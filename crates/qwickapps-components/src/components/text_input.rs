//! TextInputField: a labelled single-line input with optional helper text.

use std::sync::{Arc, LazyLock};

use qwickapps_core::{
    create_view, ChildrenStrategy, Element, Node, ViewComponent, ViewConfig, ViewProps,
};

use super::host;

pub static TEXT_INPUT_FIELD: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(
        ViewConfig::new("TextInputField", "1.0.0", render)
            .children(ChildrenStrategy::content_prop("label")),
    )
    .expect("Invalid TextInputField view config")
});

fn render(props: ViewProps) -> Node {
    let name = props.str("name").filter(|n| !n.is_empty());
    let input_id = name.map(|n| format!("field-{n}"));
    let required = props.flag("required");

    let mut field = host("div", "qwickapps-field", &props);

    if let Some(label) = props.text("label").filter(|l| !l.is_empty()) {
        let mut el = Element::intrinsic("label").with_child(label);
        if let Some(id) = &input_id {
            el = el.with_prop("htmlFor", id.as_str());
        }
        if required {
            el = el.with_child(
                Element::intrinsic("span")
                    .with_prop("aria-hidden", "true")
                    .with_child(" *"),
            );
        }
        field = field.with_child(el);
    }

    let mut input = Element::intrinsic("input").with_prop("type", "text");
    if let (Some(name), Some(id)) = (name, &input_id) {
        input = input.with_prop("name", name).with_prop("id", id.as_str());
    }
    for key in ["value", "placeholder"] {
        if let Some(value) = props.text(key) {
            input = input.with_prop(key, value);
        }
    }
    if required {
        input = input.with_prop("required", true);
    }
    field = field.with_child(input);

    if let Some(helper) = props.text("helperText").filter(|h| !h.is_empty()) {
        field = field.with_child(
            Element::intrinsic("p")
                .with_prop("className", "qwickapps-field-helper")
                .with_child(helper),
        );
    }

    field.into()
}
