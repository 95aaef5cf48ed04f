//! Schema-driven serializable views.
//!
//! This crate provides the pieces that turn component trees into portable JSON
//! documents and back: the prop model, the prop normalizer, the base-props
//! resolver, the serializable-view factory, the component registry and the
//! tree transformer. A small HTML renderer expands trees for static output.

pub mod base_props;
pub mod binding;
pub mod handlers;
pub mod normalize;
pub mod props;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod transform;
pub mod view;
pub mod wire;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use base_props::{resolve_base_props, BaseProps};
pub use binding::{BindingOptions, BindingState, DataBinding, StaticBinding};
pub use handlers::{Event, EventHandler, HandlerCompiler, HandlerError, HandlerTable, NoopCompiler};
pub use normalize::{canonicalize, normalize_props};
pub use props::{props_from_value, text_content, Callback, Element, ElementType, Node, PropValue, Props};
pub use registry::ComponentRegistry;
pub use render::render_to_html;
pub use resolve::{GridProps, GridValue};
pub use transform::Transformer;
pub use view::{
    create_view, ChildrenStrategy, RenderContext, RenderMode, ViewComponent, ViewConfig,
    ViewConfigError, ViewProps, ViewRenderer, ViewRole,
};
pub use wire::{SerializedNode, TransformError};
