//! Reading component documents from disk.
//!
//! Documents are the wire format produced by the transformer, stored either
//! as JSON or as the equivalent YAML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// On-disk encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by the file extension; anything unrecognized is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).context("Invalid JSON document"),
        DocumentFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML document"),
    }
}

/// Read and parse the document at `path`.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_document(&content, DocumentFormat::from_path(path))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a")), DocumentFormat::Json);
    }

    #[test]
    fn yaml_and_json_read_the_same() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("page.json");
        let yaml_path = dir.path().join("page.yaml");
        fs::write(
            &json_path,
            r#"{"tagName": "Text", "version": "1.0.0", "data": {"content": "Hi", "span": 6}}"#,
        )
        .unwrap();
        fs::write(
            &yaml_path,
            "tagName: Text\nversion: 1.0.0\ndata:\n  content: Hi\n  span: 6\n",
        )
        .unwrap();

        let expected = json!({"tagName": "Text", "version": "1.0.0", "data": {"content": "Hi", "span": 6}});
        assert_eq!(read_document(&json_path).unwrap(), expected);
        assert_eq!(read_document(&yaml_path).unwrap(), expected);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();

        let err = read_document(&path).unwrap_err();

        assert!(format!("{err:#}").contains("broken.json"));
    }
}
