//! Event handlers and the boundary where persisted handler sources become callables.
//!
//! A handler at rest is just its source string. Turning that string into
//! something callable only happens through a [`HandlerCompiler`] the host
//! hands to the renderer; nothing in this crate evaluates source text.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Props that are compiled from strings into handlers during normalization.
pub const EVENT_HANDLER_PROPS: [&str; 5] =
    ["onClick", "onMouseEnter", "onMouseLeave", "onFocus", "onBlur"];

/// Whether a prop key names an event handler for serialization purposes.
pub fn is_event_prop(key: &str) -> bool {
    key.starts_with("on")
}

/// An event delivered to a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Event name, e.g. "click"
    pub kind: String,

    /// Identifier of the element that fired the event, if known
    pub target: Option<String>,

    /// Free-form event payload
    pub detail: Value,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }
}

/// Shared handler function.
pub type HandlerFn = Arc<dyn Fn(&Event) + Send + Sync>;

/// A callable event handler paired with the source it is persisted as.
#[derive(Clone)]
pub struct EventHandler {
    source: String,
    callable: HandlerFn,
}

impl EventHandler {
    pub fn new(source: impl Into<String>, f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self {
            source: source.into(),
            callable: Arc::new(f),
        }
    }

    fn from_shared(source: impl Into<String>, callable: HandlerFn) -> Self {
        Self {
            source: source.into(),
            callable,
        }
    }

    /// The string this handler serializes as.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn call(&self, event: &Event) {
        (self.callable)(event)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// Handlers compare by source; live closures have no useful identity across a round trip.
impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Errors raised when a handler source cannot be turned into a callable.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Event handler source is empty")]
    Empty,

    #[error("Unknown event handler: {0}")]
    Unknown(String),

    #[error("Event handler compilation is disabled")]
    Disabled,
}

/// Turns a persisted handler source into a callable.
pub trait HandlerCompiler: Send + Sync {
    /// Compile `source` for the handler prop `prop` (e.g. "onClick").
    fn compile(&self, prop: &str, source: &str) -> Result<EventHandler, HandlerError>;
}

/// Named-handler table: handler sources are keys into pre-registered functions.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, HandlerFn>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`. Re-registering a name replaces it.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&Event) + Send + Sync + 'static,
    ) -> &mut Self {
        self.handlers.insert(name.into(), Arc::new(f));
        self
    }

    pub fn with(mut self, name: impl Into<String>, f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        self.register(name, f);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerTable").field("handlers", &names).finish()
    }
}

impl HandlerCompiler for HandlerTable {
    fn compile(&self, _prop: &str, source: &str) -> Result<EventHandler, HandlerError> {
        let key = source.trim();
        if key.is_empty() {
            return Err(HandlerError::Empty);
        }

        self.handlers
            .get(key)
            .map(|f| EventHandler::from_shared(source, f.clone()))
            .ok_or_else(|| HandlerError::Unknown(key.to_string()))
    }
}

/// Compiler that rejects every source. Handlers given as strings are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompiler;

impl HandlerCompiler for NoopCompiler {
    fn compile(&self, _prop: &str, _source: &str) -> Result<EventHandler, HandlerError> {
        Err(HandlerError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn table_compiles_registered_names() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let table = HandlerTable::new().with("submitForm", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let handler = table.compile("onClick", " submitForm ").unwrap();
        handler.call(&Event::new("click"));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(handler.source(), " submitForm ");
    }

    #[test]
    fn table_rejects_unknown_and_empty() {
        let table = HandlerTable::new();

        assert!(matches!(
            table.compile("onClick", "alert(1)"),
            Err(HandlerError::Unknown(name)) if name == "alert(1)"
        ));
        assert!(matches!(table.compile("onClick", "   "), Err(HandlerError::Empty)));
    }

    #[test]
    fn noop_compiler_rejects_everything() {
        assert!(matches!(
            NoopCompiler.compile("onBlur", "anything"),
            Err(HandlerError::Disabled)
        ));
    }

    #[test]
    fn handlers_compare_by_source() {
        let a = EventHandler::new("go", |_| {});
        let b = EventHandler::new("go", |_| {});
        let c = EventHandler::new("stop", |_| {});

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn event_prop_detection() {
        assert!(is_event_prop("onClick"));
        assert!(is_event_prop("onSubmit"));
        assert!(!is_event_prop("label"));
    }
}
