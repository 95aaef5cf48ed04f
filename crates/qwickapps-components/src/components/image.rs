//! Image: an `img` whose alt text is its content.
//!
//! `width` and `height` go through the dimension resolver like on any other
//! view, so they end up in the inline style rather than as attributes.

use std::sync::{Arc, LazyLock};

use qwickapps_core::{create_view, ChildrenStrategy, Node, ViewComponent, ViewConfig, ViewProps};

use super::host;

pub static IMAGE: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(
        ViewConfig::new("Image", "1.0.0", render).children(ChildrenStrategy::content_prop("alt")),
    )
    .expect("Invalid Image view config")
});

fn render(props: ViewProps) -> Node {
    let mut img = host("img", "qwickapps-image", &props)
        .with_prop("alt", props.text("alt").unwrap_or_default());
    if let Some(src) = props.str("src") {
        img = img.with_prop("src", src);
    }
    if props.str("loading") == Some("lazy") {
        img = img.with_prop("loading", "lazy");
    }
    img.into()
}
