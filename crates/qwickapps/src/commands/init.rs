//! Initialize a QwickApps documents project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command in `root`, writing the config to `config_path`.
pub async fn run(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing qwickapps...");

    let documents_dir = root.join("documents");

    if documents_dir.exists() {
        if !yes {
            tracing::warn!("documents/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&documents_dir).context("Failed to create documents directory")?;
    }

    let config_path = root.join(config_path);
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    let sample_path = documents_dir.join("welcome.json");
    if !sample_path.exists() || yes {
        fs::write(&sample_path, SAMPLE_DOCUMENT).context("Failed to write welcome.json")?;
        tracing::info!("Created documents/welcome.json");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'qwickapps validate' to check your documents.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# QwickApps Configuration

[documents]
# Directory scanned by `qwickapps validate`
dir = "documents"

# File extensions treated as component documents
extensions = ["json", "yaml", "yml"]

[render]
# "development" renders data-binding errors inline, "production" falls back silently
mode = "development"

# Handler names accepted in onClick/onFocus/... props
handlers = ["openDocs"]

# Static data sources, keyed by the `dataSource` prop
[bindings."cms://welcome"]
content = "Welcome to QwickApps"
"#;

const SAMPLE_DOCUMENT: &str = r#"{
  "tagName": "Container",
  "version": "1.0.0",
  "data": {
    "padding": "medium",
    "children": "[{\"tagName\":\"Text\",\"version\":\"1.0.0\",\"data\":{\"dataSource\":\"cms://welcome\",\"variant\":\"h1\"}},{\"tagName\":\"Button\",\"version\":\"1.0.0\",\"data\":{\"label\":\"Read the docs\",\"onClick\":\"openDocs\"}}]"
  }
}
"#;
