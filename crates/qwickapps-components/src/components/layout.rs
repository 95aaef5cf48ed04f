//! Layout containers: Container, GridLayout and GridCell.
//!
//! All three are react-children views with the container role, so they are
//! handed resolved grid props and surface them as `data-*` attributes.

use std::sync::{Arc, LazyLock};

use serde_json::{Map, Value};

use qwickapps_core::resolve::resolve_spacing;
use qwickapps_core::{
    create_view, GridProps, GridValue, Node, PropValue, ViewComponent, ViewConfig, ViewProps,
    ViewRole,
};

use super::{host, with_default_styles, with_grid_attributes};

/// Column count when `columns` is absent or invalid.
pub const DEFAULT_COLUMNS: u64 = 12;

pub static CONTAINER: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(ViewConfig::new("Container", "1.0.0", render_container).role(ViewRole::Container))
        .expect("Invalid Container view config")
});

pub static GRID_LAYOUT: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(ViewConfig::new("GridLayout", "1.0.0", render_grid).role(ViewRole::Container))
        .expect("Invalid GridLayout view config")
});

pub static GRID_CELL: LazyLock<Arc<ViewComponent>> = LazyLock::new(|| {
    create_view(ViewConfig::new("GridCell", "1.0.0", render_cell).role(ViewRole::Container))
        .expect("Invalid GridCell view config")
});

fn render_container(mut props: ViewProps) -> Node {
    let children = props.take_children();
    let el = host("div", "qwickapps-container", &props);

    with_grid_attributes(el, props.grid_props.as_ref())
        .with_child(children)
        .into()
}

fn render_grid(mut props: ViewProps) -> Node {
    let children = props.take_children();
    let columns = props
        .get("columns")
        .and_then(PropValue::as_json)
        .and_then(Value::as_u64)
        .filter(|c| *c > 0)
        .unwrap_or(DEFAULT_COLUMNS);

    let mut styles = Map::new();
    styles.insert("display".into(), Value::from("grid"));
    styles.insert(
        "gridTemplateColumns".into(),
        Value::from(format!("repeat({columns}, minmax(0, 1fr))")),
    );
    if let Some(gap) = props
        .get("spacing")
        .and_then(PropValue::as_json)
        .and_then(resolve_spacing)
    {
        styles.insert("gap".into(), gap);
    }

    let el = host("div", "qwickapps-grid", &props).with_prop("data-columns", columns.to_string());
    let el = with_default_styles(el, styles);

    with_grid_attributes(el, props.grid_props.as_ref())
        .with_child(children)
        .into()
}

fn render_cell(mut props: ViewProps) -> Node {
    let children = props.take_children();

    let mut styles = Map::new();
    if let Some(column) = props.grid_props.as_ref().and_then(grid_column) {
        styles.insert("gridColumn".into(), Value::from(column));
    }

    let el = with_default_styles(host("div", "qwickapps-grid-cell", &props), styles);

    with_grid_attributes(el, props.grid_props.as_ref())
        .with_child(children)
        .into()
}

/// `grid-column` for the widest breakpoint that has a value.
fn grid_column(grid: &GridProps) -> Option<String> {
    let value = grid
        .breakpoints()
        .into_iter()
        .rev()
        .find_map(|(_, value)| value)?;

    Some(match value {
        GridValue::Span(n) => format!("span {n}"),
        GridValue::Auto => "auto".to_string(),
        GridValue::Grow => "1 / -1".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::TEXT;
    use pretty_assertions::assert_eq;
    use qwickapps_core::{props_from_value, render_to_html, Element, RenderContext};
    use serde_json::json;

    fn html(el: Element) -> String {
        render_to_html(&el.into(), &RenderContext::default())
    }

    fn text(content: &str) -> Node {
        TEXT.element(props_from_value(&json!({"content": content}))).into()
    }

    #[test]
    fn container_wraps_children() {
        let el = CONTAINER
            .element(props_from_value(&json!({"className": "page"})))
            .with_child(text("a"))
            .with_child(text("b"));

        assert_eq!(
            html(el),
            concat!(
                r#"<div class="qwickapps-container page">"#,
                r#"<p class="qwickapps-text">a</p><p class="qwickapps-text">b</p>"#,
                "</div>",
            )
        );
    }

    #[test]
    fn grid_layout_sets_columns_and_gap() {
        let el = GRID_LAYOUT
            .element(props_from_value(&json!({"columns": 3, "spacing": "medium"})))
            .with_child(text("x"));

        assert_eq!(
            html(el),
            concat!(
                r#"<div class="qwickapps-grid" data-columns="3" "#,
                r#"style="display:grid;gap:16px;grid-template-columns:repeat(3, minmax(0, 1fr))">"#,
                r#"<p class="qwickapps-text">x</p></div>"#,
            )
        );
    }

    #[test]
    fn grid_layout_defaults_to_twelve_columns() {
        let html = html(GRID_LAYOUT.element(props_from_value(&json!({"columns": "wide"}))));

        assert!(html.contains(r#"data-columns="12""#));
    }

    #[test]
    fn grid_cell_surfaces_breakpoints() {
        let el = GRID_CELL.element(props_from_value(&json!({"span": "6", "lg": 4})));

        assert_eq!(
            html(el),
            concat!(
                r#"<div class="qwickapps-grid-cell" data-lg="4" data-md="6" data-sm="6" "#,
                r#"data-xl="6" data-xs="6" style="grid-column:span 6"></div>"#,
            )
        );
    }

    #[test]
    fn grid_column_prefers_widest_breakpoint() {
        let grid = GridProps {
            xs: Some(GridValue::Span(12)),
            lg: Some(GridValue::Grow),
            ..GridProps::default()
        };

        assert_eq!(grid_column(&grid).as_deref(), Some("1 / -1"));
        assert_eq!(grid_column(&GridProps::default()), None);
    }
}
