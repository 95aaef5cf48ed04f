//! Code: a highlighted code block with an optional title and copy button.

use std::sync::{Arc, LazyLock};

use qwickapps_core::{
    create_view, ChildrenStrategy, Element, Node, ViewComponent, ViewConfig, ViewProps,
};

use super::host;

pub static CODE: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(ViewConfig::new("Code", "1.0.0", render).children(ChildrenStrategy::content()))
        .expect("Invalid Code view config")
});

fn render(props: ViewProps) -> Node {
    let content = props.text("content").unwrap_or_default();
    let language = props.str("language").filter(|l| !l.is_empty());

    let mut code = Element::intrinsic("code").with_child(content);
    if let Some(language) = language {
        code = code.with_prop("className", format!("language-{language}"));
    }

    let mut block = host("div", "qwickapps-code", &props);
    if let Some(language) = language {
        block = block.with_prop("data-language", language);
    }
    if let Some(title) = props.text("title") {
        block = block.with_child(
            Element::intrinsic("div")
                .with_prop("className", "qwickapps-code-title")
                .with_child(title),
        );
    }
    if props.flag("showCopy") {
        block = block.with_child(
            Element::intrinsic("button")
                .with_prop("type", "button")
                .with_prop("className", "qwickapps-code-copy")
                .with_prop("aria-label", "Copy code")
                .with_child("Copy"),
        );
    }

    block.with_child(Element::intrinsic("pre").with_child(code)).into()
}
