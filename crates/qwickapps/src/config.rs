//! `qwickapps.toml` loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use qwickapps_core::{HandlerTable, RenderMode, StaticBinding};

/// Configuration file structure (qwickapps.toml).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub documents: DocumentsConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// Data-source key to the fields it resolves to
    #[serde(default)]
    pub bindings: BTreeMap<String, Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentsConfig {
    /// Directory scanned by `validate`
    #[serde(default = "default_documents_dir")]
    pub dir: PathBuf,

    /// File extensions treated as documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            dir: default_documents_dir(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub mode: RenderMode,

    /// Handler names accepted in `on*` props
    #[serde(default)]
    pub handlers: Vec<String>,
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("documents")
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string(), "yaml".to_string(), "yml".to_string()]
}

impl Config {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Static data provider built from `[bindings]`.
    pub fn binding(&self) -> StaticBinding {
        let mut binding = StaticBinding::new();
        for (source, fields) in &self.bindings {
            binding.insert(source.clone(), fields.clone());
        }
        binding
    }

    /// Handler table accepting the names listed under `[render] handlers`.
    ///
    /// Static output never fires events, so the registered callables only log.
    pub fn handlers(&self) -> HandlerTable {
        let mut table = HandlerTable::new();
        for name in &self.render.handlers {
            let name = name.trim().to_string();
            let label = name.clone();
            table.register(name, move |event| {
                tracing::debug!("Handler {} fired for {}", label, event.kind);
            });
        }
        table
    }

    /// Whether `path` has one of the configured document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.documents
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}
