//! Render a document to static HTML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use qwickapps_components::standard_registry;
use qwickapps_core::{render_to_html, RenderContext, RenderMode, Transformer};

use crate::config::Config;
use crate::documents::read_document;

/// Run the render command.
pub async fn run(
    config: &Config,
    file: &Path,
    production: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let html = render_file(config, file, production)?;

    match output {
        Some(path) => {
            fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Rendered {} to {}", file.display(), path.display());
        }
        None => println!("{html}"),
    }

    Ok(())
}

/// Deserialize `file` and render it with the configured bindings and handlers.
pub fn render_file(config: &Config, file: &Path, production: bool) -> Result<String> {
    let document = read_document(file)?;
    let registry = standard_registry();
    let tree = Transformer::new(&registry)
        .deserialize_value(&document)
        .with_context(|| format!("Failed to deserialize {}", file.display()))?;

    let handlers = config.handlers();
    let binding = config.binding();
    let mode = if production {
        RenderMode::Production
    } else {
        config.render.mode
    };
    let ctx = RenderContext::new(&handlers)
        .with_binding(&binding)
        .with_mode(mode);

    Ok(render_to_html(&tree, &ctx))
}
