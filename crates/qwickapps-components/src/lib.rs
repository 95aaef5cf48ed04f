//! The standard QwickApps component library.
//!
//! Every component here is a [`ViewComponent`] built with
//! [`create_view`](qwickapps_core::create_view) and exposed as a lazily
//! initialized static. [`standard_registry`] collects them for a transformer.

pub mod components;

use std::sync::Arc;

use qwickapps_core::{ComponentRegistry, ViewComponent};

pub use components::button::BUTTON;
pub use components::code::CODE;
pub use components::image::IMAGE;
pub use components::layout::{CONTAINER, GRID_CELL, GRID_LAYOUT};
pub use components::text::TEXT;
pub use components::text_input::TEXT_INPUT_FIELD;

/// Every component in the library.
pub fn all_components() -> Vec<Arc<ViewComponent>> {
    vec![
        Arc::clone(&TEXT),
        Arc::clone(&CODE),
        Arc::clone(&BUTTON),
        Arc::clone(&TEXT_INPUT_FIELD),
        Arc::clone(&IMAGE),
        Arc::clone(&CONTAINER),
        Arc::clone(&GRID_LAYOUT),
        Arc::clone(&GRID_CELL),
    ]
}

/// A registry with every component in the library.
pub fn standard_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    for component in all_components() {
        registry.register(component);
    }
    tracing::debug!("Registered {} standard components", registry.len());
    registry
}
