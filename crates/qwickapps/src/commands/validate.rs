//! Validate every document under a directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use qwickapps_components::standard_registry;
use qwickapps_core::{ComponentRegistry, ElementType, Node, PropValue, Transformer};

use crate::config::Config;
use crate::documents::read_document;

/// Outcome of validating one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,

    /// Number of components in the document, or why it failed
    pub outcome: Result<usize, String>,
}

/// Run the validate command.
pub async fn run(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let root = path.unwrap_or_else(|| config.documents.dir.clone());
    tracing::info!("Validating documents in {}", root.display());

    let files = discover(config, &root)?;
    let registry = standard_registry();
    let reports = validate_files(&registry, &files);

    let mut failed = 0;
    let mut components = 0;
    for report in &reports {
        match &report.outcome {
            Ok(count) => {
                components += count;
                tracing::info!("ok    {} ({} components)", report.path.display(), count);
            }
            Err(message) => {
                failed += 1;
                tracing::error!("FAIL  {}: {}", report.path.display(), message);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} documents failed validation", failed, reports.len());
    }

    tracing::info!(
        "Validated {} documents with {} components",
        reports.len(),
        components
    );
    Ok(())
}

/// Document files under `root`, sorted. A file path is returned as-is.
pub fn discover(config: &Config, root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.exists() {
        bail!("Documents directory not found: {}", root.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| config.is_document(p))
        .collect();
    files.sort();

    Ok(files)
}

/// Validate files in parallel, keeping input order.
pub fn validate_files(registry: &ComponentRegistry, files: &[PathBuf]) -> Vec<FileReport> {
    files
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            outcome: validate_file(registry, path),
        })
        .collect()
}

fn validate_file(registry: &ComponentRegistry, path: &Path) -> Result<usize, String> {
    let value = read_document(path).map_err(|e| format!("{e:#}"))?;
    let tree = Transformer::new(registry)
        .deserialize_value(&value)
        .map_err(|e| e.to_string())?;
    Ok(component_count(&tree))
}

/// Number of component elements in a tree.
pub fn component_count(node: &Node) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            Node::List(items) => stack.extend(items.iter()),
            Node::Element(el) => {
                if matches!(el.ty, ElementType::Component(_)) {
                    count += 1;
                }
                if let Some(PropValue::Node(children)) = el.props.get("children") {
                    stack.push(children);
                }
            }
            _ => {}
        }
    }
    count
}
