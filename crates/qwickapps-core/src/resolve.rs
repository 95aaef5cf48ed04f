//! Grid, dimension and spacing resolvers.
//!
//! Pure lookups from semantic size tokens ("medium", "auto", "grow") and raw
//! CSS strings to values the renderer can put into a style object.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::props::{PropValue, Props};

/// Grid breakpoints, smallest first.
pub const BREAKPOINTS: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

/// A resolved grid cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridValue {
    /// Number of columns spanned
    Span(u32),
    /// Size to content
    Auto,
    /// Take the remaining space
    Grow,
}

impl GridValue {
    /// Read a grid value from a prop. Non-positive numbers and unknown strings yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                let span = n.as_u64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.is_finite() && *f >= 1.0)
                        .map(|f| f as u64)
                })?;
                u32::try_from(span).ok().filter(|s| *s > 0).map(GridValue::Span)
            }
            Value::String(s) => match s.trim() {
                "auto" => Some(GridValue::Auto),
                "grow" => Some(GridValue::Grow),
                other => parse_span(other).map(GridValue::Span),
            },
            _ => None,
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            GridValue::Span(n) => Value::from(n),
            GridValue::Auto => Value::from("auto"),
            GridValue::Grow => Value::from("grow"),
        }
    }
}

impl fmt::Display for GridValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridValue::Span(n) => write!(f, "{n}"),
            GridValue::Auto => f.write_str("auto"),
            GridValue::Grow => f.write_str("grow"),
        }
    }
}

/// Positive integer from a numeric string.
pub(crate) fn parse_span(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Per-breakpoint grid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridProps {
    pub xs: Option<GridValue>,
    pub sm: Option<GridValue>,
    pub md: Option<GridValue>,
    pub lg: Option<GridValue>,
    pub xl: Option<GridValue>,
}

impl GridProps {
    /// Breakpoint name paired with its value, smallest first.
    pub fn breakpoints(&self) -> [(&'static str, Option<GridValue>); 5] {
        [
            ("xs", self.xs),
            ("sm", self.sm),
            ("md", self.md),
            ("lg", self.lg),
            ("xl", self.xl),
        ]
    }
}

/// Build grid props, broadcasting `span` to every breakpoint not set explicitly.
///
/// Returns `None` when none of `span`, `xs`..`xl` is set.
pub fn resolve_grid(props: &Props) -> Option<GridProps> {
    let read = |key: &str| {
        props
            .get(key)
            .and_then(PropValue::as_json)
            .and_then(GridValue::from_value)
    };

    let span = read("span");
    let grid = GridProps {
        xs: read("xs").or(span),
        sm: read("sm").or(span),
        md: read("md").or(span),
        lg: read("lg").or(span),
        xl: read("xl").or(span),
    };

    if grid == GridProps::default() {
        None
    } else {
        Some(grid)
    }
}

/// Which dimension a size token is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// Axis for a dimension prop name (`minHeight` -> Height).
    pub fn for_prop(key: &str) -> Self {
        if key.contains("eight") {
            Axis::Height
        } else {
            Axis::Width
        }
    }
}

const WIDTH_TOKENS: [(&str, u32); 6] = [
    ("tiny", 120),
    ("small", 240),
    ("medium", 480),
    ("large", 720),
    ("x-large", 960),
    ("huge", 1200),
];

const HEIGHT_TOKENS: [(&str, u32); 6] = [
    ("tiny", 40),
    ("small", 80),
    ("medium", 160),
    ("large", 320),
    ("x-large", 480),
    ("huge", 640),
];

const SPACING_TOKENS: [(&str, u32); 6] = [
    ("tiny", 4),
    ("small", 8),
    ("medium", 16),
    ("large", 24),
    ("x-large", 32),
    ("huge", 48),
];

fn lookup(table: &[(&str, u32)], token: &str) -> Option<u32> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, px)| *px)
}

static CSS_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:-?(?:\d+|\d*\.\d+)(?:px|%|em|rem|vh|vw|vmin|vmax|ch|ex|pt|cm|mm|in|fr)?|(?:calc|var|min|max|clamp)\(.*\)|inherit|initial|unset|fit-content|min-content|max-content|none)$",
    )
    .expect("Invalid CSS value regex")
});

/// Whether a string looks like a raw CSS length or keyword.
pub fn is_css_value(s: &str) -> bool {
    CSS_VALUE_RE.is_match(s.trim())
}

/// A resolved dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// A CSS value for the dimension property itself
    Css(Value),
    /// Flex-grow instead of a fixed size
    Grow,
}

/// Resolve a width/height-like value.
///
/// Unknown strings are kept as-is with a warning rather than rejected.
pub fn resolve_dimension(value: &Value, axis: Axis) -> Option<Dimension> {
    match value {
        Value::Number(_) => Some(Dimension::Css(value.clone())),
        Value::String(raw) => {
            let s = raw.trim();
            if s.eq_ignore_ascii_case("auto") {
                return Some(Dimension::Css(Value::from("auto")));
            }
            if s.eq_ignore_ascii_case("grow") {
                return Some(Dimension::Grow);
            }
            let table = match axis {
                Axis::Width => &WIDTH_TOKENS,
                Axis::Height => &HEIGHT_TOKENS,
            };
            if let Some(px) = lookup(table, s) {
                return Some(Dimension::Css(Value::from(format!("{px}px"))));
            }
            if !is_css_value(s) {
                tracing::warn!("Unrecognized dimension value {:?}, passing through", raw);
            }
            Some(Dimension::Css(Value::from(s)))
        }
        _ => None,
    }
}

/// Resolve a padding/margin value. Accepts CSS shorthand with up to four parts.
pub fn resolve_spacing(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(raw) => {
            let parts: Vec<&str> = raw.split_whitespace().collect();
            if parts.is_empty() {
                return None;
            }
            if parts.len() > 4 {
                tracing::warn!("Spacing value {:?} has more than four parts, passing through", raw);
                return Some(Value::from(raw.trim()));
            }

            let resolved: Vec<String> = parts
                .iter()
                .map(|part| {
                    if let Some(px) = lookup(&SPACING_TOKENS, part) {
                        format!("{px}px")
                    } else {
                        if !is_css_value(part) && !part.eq_ignore_ascii_case("auto") {
                            tracing::warn!("Unrecognized spacing value {:?}, passing through", part);
                        }
                        part.to_string()
                    }
                })
                .collect();

            Some(Value::from(resolved.join(" ")))
        }
        _ => None,
    }
}
