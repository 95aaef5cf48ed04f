//! Data-binding collaborator: resolves a `dataSource` key into prop values.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::props::Props;

/// Options passed through the `bindingOptions` prop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingOptions {
    /// Fields to use when the data source has no entry
    #[serde(default)]
    pub fallback: Option<Map<String, Value>>,

    /// Fail on unknown sources even when a fallback is given
    #[serde(default)]
    pub strict: bool,
}

/// Outcome of resolving a data source for one render.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingState {
    /// Lookup still in flight; the view renders a loading placeholder
    Pending,
    /// Fields to merge over the component's own props
    Resolved(Map<String, Value>),
    /// Lookup failed with a message
    Failed(String),
}

/// Resolves data sources for views that declare a `dataSource` prop.
pub trait DataBinding: Send + Sync {
    fn resolve(&self, source: &str, props: &Props, options: &BindingOptions) -> BindingState;
}

/// In-memory data provider keyed by data-source string.
#[derive(Debug, Clone, Default)]
pub struct StaticBinding {
    sources: HashMap<String, Map<String, Value>>,
    pending: HashSet<String>,
}

impl StaticBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, fields: Map<String, Value>) -> &mut Self {
        let source = source.into();
        self.pending.remove(&source);
        self.sources.insert(source, fields);
        self
    }

    pub fn with(mut self, source: impl Into<String>, fields: Map<String, Value>) -> Self {
        self.insert(source, fields);
        self
    }

    /// Mark a source as still loading.
    pub fn mark_pending(&mut self, source: impl Into<String>) -> &mut Self {
        self.pending.insert(source.into());
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl From<HashMap<String, Map<String, Value>>> for StaticBinding {
    fn from(sources: HashMap<String, Map<String, Value>>) -> Self {
        Self {
            sources,
            pending: HashSet::new(),
        }
    }
}

impl DataBinding for StaticBinding {
    fn resolve(&self, source: &str, _props: &Props, options: &BindingOptions) -> BindingState {
        if self.pending.contains(source) {
            return BindingState::Pending;
        }

        match self.sources.get(source) {
            Some(fields) => BindingState::Resolved(fields.clone()),
            None => match (&options.fallback, options.strict) {
                (Some(fallback), false) => BindingState::Resolved(fallback.clone()),
                _ => BindingState::Failed(format!("Unknown data source: {source}")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn resolves_known_sources() {
        let binding = StaticBinding::new().with("cms://hero", fields(json!({"content": "Hi"})));

        assert_eq!(
            binding.resolve("cms://hero", &Props::new(), &BindingOptions::default()),
            BindingState::Resolved(fields(json!({"content": "Hi"})))
        );
    }

    #[test]
    fn unknown_sources_fail_without_fallback() {
        let binding = StaticBinding::new();

        assert!(matches!(
            binding.resolve("cms://missing", &Props::new(), &BindingOptions::default()),
            BindingState::Failed(msg) if msg.contains("cms://missing")
        ));
    }

    #[test]
    fn fallback_is_used_for_unknown_sources() {
        let options: BindingOptions =
            serde_json::from_value(json!({"fallback": {"content": "default"}})).unwrap();

        assert_eq!(
            StaticBinding::new().resolve("cms://x", &Props::new(), &options),
            BindingState::Resolved(fields(json!({"content": "default"})))
        );
    }

    #[test]
    fn strict_ignores_fallback() {
        let options: BindingOptions =
            serde_json::from_value(json!({"fallback": {"content": "default"}, "strict": true}))
                .unwrap();

        assert!(matches!(
            StaticBinding::new().resolve("cms://x", &Props::new(), &options),
            BindingState::Failed(_)
        ));
    }

    #[test]
    fn pending_sources_report_pending() {
        let mut binding = StaticBinding::new();
        binding.mark_pending("cms://slow");

        assert_eq!(
            binding.resolve("cms://slow", &Props::new(), &BindingOptions::default()),
            BindingState::Pending
        );
    }
}
