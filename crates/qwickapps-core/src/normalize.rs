//! Prop normalization.
//!
//! [`canonicalize`] is the serialization-safe part: background aliasing, grid
//! coercion and `sx`/`style` string parsing. [`normalize_props`] adds handler
//! compilation on top and is what the renderer runs. Both are total and
//! idempotent; parse failures are logged and the offending prop is dropped.

use serde_json::Value;

use crate::handlers::{HandlerCompiler, EVENT_HANDLER_PROPS};
use crate::props::{PropValue, Props};
use crate::resolve::parse_span;

/// Grid props subject to coercion.
pub const GRID_PROPS: [&str; 6] = ["span", "xs", "sm", "md", "lg", "xl"];

/// Props that may arrive as stringified JSON objects.
pub const STYLE_OBJECT_PROPS: [&str; 2] = ["sx", "style"];

/// Coerce a raw grid value.
///
/// Numbers and the strings "auto"/"grow" pass through, positive integer
/// strings become numbers, every other string is dropped. Non-string,
/// non-number values are left alone.
pub fn coerce_grid(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => match s.as_str() {
            "auto" | "grow" => Some(value.clone()),
            other => parse_span(other).map(Value::from),
        },
        _ => Some(value.clone()),
    }
}

/// Canonicalize props without compiling handlers.
pub fn canonicalize(props: &Props) -> Props {
    let mut out = props.clone();

    canonicalize_background(&mut out);

    for key in GRID_PROPS {
        if let Some(PropValue::Json(value)) = out.get(key) {
            match coerce_grid(value) {
                Some(coerced) => {
                    out.insert(key.to_string(), PropValue::Json(coerced));
                }
                None => {
                    out.remove(key);
                }
            }
        }
    }

    for key in STYLE_OBJECT_PROPS {
        parse_style_object(&mut out, key);
    }

    out
}

/// Canonicalize props and compile string event handlers through `compiler`.
///
/// Handlers that fail to compile are logged and removed; handlers that are
/// already callables pass through untouched.
pub fn normalize_props(props: &Props, compiler: &dyn HandlerCompiler) -> Props {
    let mut out = canonicalize(props);

    for key in EVENT_HANDLER_PROPS {
        let Some(source) = out.get(key).and_then(PropValue::as_str) else {
            continue;
        };
        if source.trim().is_empty() {
            continue;
        }

        match compiler.compile(key, source) {
            Ok(handler) => {
                out.insert(key.to_string(), PropValue::Handler(handler));
            }
            Err(e) => {
                tracing::warn!("Failed to compile {} handler: {}", key, e);
                out.remove(key);
            }
        }
    }

    out
}

/// `background` wins over `backgroundColor`; the alias never survives.
fn canonicalize_background(props: &mut Props) {
    let alias = props.remove("backgroundColor");
    let has_background = props.get("background").is_some_and(|v| !v.is_null());

    if !has_background {
        if let Some(value) = alias.filter(|v| !v.is_null()) {
            props.insert("background".to_string(), value);
        }
    }
}

fn parse_style_object(props: &mut Props, key: &str) {
    let Some(raw) = props.get(key).and_then(PropValue::as_str) else {
        return;
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(parsed @ Value::Object(_)) => {
            props.insert(key.to_string(), PropValue::Json(parsed));
        }
        Ok(_) => {
            tracing::warn!("Ignoring {}: expected a JSON object", key);
            props.remove(key);
        }
        Err(e) => {
            tracing::warn!("Ignoring {}: malformed JSON: {}", key, e);
            props.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::props_from_value;
    use crate::handlers::{HandlerTable, NoopCompiler};
    use crate::testing::capture_warnings;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn props(value: Value) -> Props {
        props_from_value(&value)
    }

    #[test]
    fn coerce_grid_cases() {
        assert_eq!(coerce_grid(&json!("12")), Some(json!(12)));
        assert_eq!(coerce_grid(&json!("auto")), Some(json!("auto")));
        assert_eq!(coerce_grid(&json!("grow")), Some(json!("grow")));
        assert_eq!(coerce_grid(&json!("-5")), None);
        assert_eq!(coerce_grid(&json!("0")), None);
        assert_eq!(coerce_grid(&json!("wide")), None);
        assert_eq!(coerce_grid(&json!(8)), Some(json!(8)));
    }

    #[test]
    fn background_wins_over_alias() {
        for (a, b) in [("red", "blue"), ("", "x"), ("#fff", "#fff")] {
            let out = canonicalize(&props(json!({"background": a, "backgroundColor": b})));

            assert_eq!(out.get("background"), Some(&PropValue::from(a)));
            assert!(!out.contains_key("backgroundColor"));
        }
    }

    #[test]
    fn alias_is_copied_when_background_missing() {
        let out = canonicalize(&props(json!({"backgroundColor": "teal"})));

        assert_eq!(out.get("background"), Some(&PropValue::from("teal")));
        assert!(!out.contains_key("backgroundColor"));
    }

    #[test]
    fn grid_strings_are_coerced() {
        let out = canonicalize(&props(json!({"span": "6", "xs": "0", "md": "auto", "lg": 3})));

        assert_eq!(out.get("span"), Some(&PropValue::from(6u32)));
        assert!(!out.contains_key("xs"));
        assert_eq!(out.get("md"), Some(&PropValue::from("auto")));
        assert_eq!(out.get("lg"), Some(&PropValue::from(3u32)));
    }

    #[test]
    fn sx_strings_are_parsed() {
        let out = canonicalize(&props(json!({"sx": "{\"color\": \"red\"}"})));

        assert_eq!(out.get("sx"), Some(&PropValue::Json(json!({"color": "red"}))));
    }

    #[test]
    fn malformed_style_warns_and_drops() {
        let (out, warnings) =
            capture_warnings(|| canonicalize(&props(json!({"style": "{color: red", "id": "a"}))));

        assert!(!out.contains_key("style"));
        assert_eq!(out.get("id"), Some(&PropValue::from("a")));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("malformed JSON"));
    }

    #[test]
    fn object_styles_pass_through() {
        let input = props(json!({"sx": {"margin": 4}}));

        assert_eq!(canonicalize(&input), input);
    }

    #[test]
    fn handlers_compile_through_table() {
        let table = HandlerTable::new().with("save", |_| {});
        let out = normalize_props(&props(json!({"onClick": "save", "onBlur": "missing"})), &table);

        assert!(matches!(out.get("onClick"), Some(PropValue::Handler(h)) if h.source() == "save"));
        assert!(!out.contains_key("onBlur"));
    }

    #[test]
    fn handler_failures_warn() {
        let (out, warnings) = capture_warnings(|| {
            normalize_props(&props(json!({"onFocus": "doThing()"})), &NoopCompiler)
        });

        assert!(out.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("onFocus"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let table = HandlerTable::new().with("save", |_| {});
        let input = props(json!({
            "backgroundColor": "navy",
            "span": "4",
            "xl": "nope",
            "sx": "{\"p\": 2}",
            "onClick": "save",
            "title": "t",
        }));

        let once = normalize_props(&input, &table);
        let twice = normalize_props(&once, &table);

        assert_eq!(once, twice);
    }

    #[test]
    fn other_props_untouched() {
        let input = props(json!({"zero": 0, "flag": false, "empty": "", "list": [1, 2]}));

        assert_eq!(canonicalize(&input), input);
    }
}
