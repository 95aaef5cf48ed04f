//! Component registry for looking up view components by tag name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::view::ViewComponent;

/// A registry of serializable components, keyed by tag name.
///
/// Registries are plain values: build one at startup, hand it to a
/// [`Transformer`](crate::transform::Transformer), and build a fresh one per
/// test instead of clearing a shared instance.
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<ViewComponent>>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. The last registration for a tag wins; the
    /// replaced component is returned.
    pub fn register(&mut self, component: Arc<ViewComponent>) -> Option<Arc<ViewComponent>> {
        let previous = self
            .components
            .insert(component.tag_name().to_string(), component);
        if let Some(old) = &previous {
            tracing::debug!(
                "Replaced registered component {}@{}",
                old.tag_name(),
                old.version()
            );
        }
        previous
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, component: Arc<ViewComponent>) -> Self {
        self.register(component);
        self
    }

    /// Look up a component by exact tag name.
    pub fn get(&self, tag_name: &str) -> Option<&Arc<ViewComponent>> {
        self.components.get(tag_name)
    }

    pub fn contains(&self, tag_name: &str) -> bool {
        self.components.contains_key(tag_name)
    }

    /// Registered tag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.components.clear();
    }
}
