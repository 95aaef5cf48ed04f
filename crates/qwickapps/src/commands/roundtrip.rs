//! Deserialize a document, serialize it again and check the result is stable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use qwickapps_components::standard_registry;
use qwickapps_core::{ComponentRegistry, TransformError, Transformer};

use crate::documents::read_document;

/// Result of a round trip.
#[derive(Debug)]
pub struct RoundTrip {
    /// Document as the transformer writes it
    pub canonical: Value,

    /// Whether a second pass reproduced `canonical`
    pub stable: bool,

    /// Whether the input was already canonical
    pub unchanged: bool,
}

/// Round-trip a parsed document twice against `registry`.
pub fn round_trip(registry: &ComponentRegistry, document: &Value) -> Result<RoundTrip, TransformError> {
    let transformer = Transformer::new(registry);

    let tree = transformer.deserialize_value(document)?;
    let canonical = transformer.serialize_value(&tree);
    let again = transformer.serialize_value(&transformer.deserialize_value(&canonical)?);

    Ok(RoundTrip {
        stable: again == canonical,
        unchanged: &canonical == document,
        canonical,
    })
}

/// Run the roundtrip command.
pub async fn run(file: &Path, output: Option<PathBuf>) -> Result<()> {
    let document = read_document(file)?;
    let registry = standard_registry();

    let result = round_trip(&registry, &document)
        .with_context(|| format!("Failed to deserialize {}", file.display()))?;

    if !result.stable {
        bail!("{} does not round-trip to a stable document", file.display());
    }
    if result.unchanged {
        tracing::info!("{} is already canonical", file.display());
    } else {
        tracing::info!("{} was normalized", file.display());
    }

    let text = serde_json::to_string_pretty(&result.canonical)?;
    match output {
        Some(path) => {
            fs::write(&path, format!("{text}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn canonical_documents_are_unchanged() {
        let document = json!({"tagName": "Text", "version": "1.0.0", "data": {"content": "Hi"}});

        let result = round_trip(&standard_registry(), &document).unwrap();

        assert!(result.stable);
        assert!(result.unchanged);
    }

    #[test]
    fn aliases_and_strings_are_normalized() {
        let document = json!({
            "tagName": "GridCell",
            "version": "1.0.0",
            "data": {"span": "6", "backgroundColor": "navy", "empty": null},
        });

        let result = round_trip(&standard_registry(), &document).unwrap();

        assert!(result.stable);
        assert!(!result.unchanged);
        assert_eq!(
            result.canonical,
            json!({"tagName": "GridCell", "version": "1.0.0", "data": {"span": 6, "background": "navy"}})
        );
    }

    #[test]
    fn unknown_tags_fail() {
        let document = json!({"tagName": "Carousel", "version": "1.0.0", "data": {}});

        assert!(matches!(
            round_trip(&standard_registry(), &document),
            Err(TransformError::UnknownTag(_))
        ));
    }

    #[tokio::test]
    async fn run_writes_canonical_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("page.yaml");
        let output = dir.path().join("page.json");
        fs::write(
            &input,
            "tagName: Button\nversion: 1.0.0\ndata:\n  label: Save\n  onClick: saveDraft\n",
        )
        .unwrap();

        run(&input, Some(output.clone())).await.unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({"tagName": "Button", "version": "1.0.0", "data": {"label": "Save", "onClick": "saveDraft"}})
        );
    }
}
