//! Button: an action button, or a link when `href` is set.

use std::sync::{Arc, LazyLock};

use qwickapps_core::handlers::EVENT_HANDLER_PROPS;
use qwickapps_core::{
    create_view, ChildrenStrategy, Node, PropValue, ViewComponent, ViewConfig, ViewProps,
};

use super::host;

pub static BUTTON: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(
        ViewConfig::new("Button", "1.0.0", render)
            .children(ChildrenStrategy::content_prop("label"))
            .finalize(disable_handlers),
    )
    .expect("Invalid Button view config")
});

/// A disabled button keeps no event handlers.
fn disable_handlers(mut props: ViewProps) -> ViewProps {
    if props.flag("disabled") {
        for key in EVENT_HANDLER_PROPS {
            props.props.remove(key);
        }
    }
    props
}

fn render(props: ViewProps) -> Node {
    let variant = props.str("variant").unwrap_or("contained");
    let class = format!("qwickapps-button qwickapps-button-{variant}");
    let label = props.text("label").unwrap_or_default();
    let disabled = props.flag("disabled");

    let el = match props.str("href") {
        Some(href) if !disabled => host("a", &class, &props).with_prop("href", href),
        _ => {
            let el = host("button", &class, &props).with_prop("type", "button");
            if disabled {
                el.with_prop("disabled", true).with_prop("aria-disabled", "true")
            } else {
                el
            }
        }
    };

    el.with_child(label).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qwickapps_core::{props_from_value, render_to_html, HandlerTable, RenderContext};
    use serde_json::json;

    #[test]
    fn renders_link_when_href_is_set() {
        let el = BUTTON.element(props_from_value(&json!({
            "label": "Docs",
            "href": "/docs",
            "variant": "text",
        })));

        assert_eq!(
            render_to_html(&el.into(), &RenderContext::default()),
            r#"<a class="qwickapps-button qwickapps-button-text" href="/docs">Docs</a>"#
        );
    }

    #[test]
    fn disabled_button_drops_handlers() {
        let table = HandlerTable::new().with("save", |_| {});
        let ctx = RenderContext::new(&table);
        let props = props_from_value(&json!({"label": "Save", "onClick": "save", "disabled": true}));

        let Node::Element(el) = BUTTON.render(&props, &ctx) else {
            panic!("expected a button element");
        };

        assert!(!el.props.contains_key("onClick"));
        assert_eq!(el.props.get("disabled"), Some(&PropValue::from(true)));
    }

    #[test]
    fn enabled_button_keeps_handlers() {
        let table = HandlerTable::new().with("save", |_| {});
        let ctx = RenderContext::new(&table);
        let props = props_from_value(&json!({"label": "Save", "onClick": "save"}));

        let Node::Element(el) = BUTTON.render(&props, &ctx) else {
            panic!("expected a button element");
        };

        assert!(matches!(el.props.get("onClick"), Some(PropValue::Handler(_))));
    }

    #[test]
    fn label_comes_from_children() {
        let el = BUTTON.element(Default::default()).with_child("Go");

        assert_eq!(
            render_to_html(&el.into(), &RenderContext::default()),
            r#"<button class="qwickapps-button qwickapps-button-contained" type="button">Go</button>"#
        );
    }
}
