//! Text: a paragraph, heading or inline span.

use std::sync::{Arc, LazyLock};

use qwickapps_core::{create_view, ChildrenStrategy, Node, ViewComponent, ViewConfig, ViewProps};

use super::host;

pub static TEXT: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(ViewConfig::new("Text", "1.0.0", render).children(ChildrenStrategy::content()))
        .expect("Invalid Text view config")
});

fn tag_for(variant: Option<&str>) -> &'static str {
    match variant {
        Some("h1") => "h1",
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        Some("span" | "caption" | "overline") => "span",
        _ => "p",
    }
}

fn render(props: ViewProps) -> Node {
    let tag = tag_for(props.str("variant"));
    let content = props.text("content").unwrap_or_default();

    host(tag, "qwickapps-text", &props).with_child(content).into()
}
