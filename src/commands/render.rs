//! Render a single blog JSON document to an HTML page

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::Blog;
use crate::generator::Generator;
use crate::Folio;

/// Render the blog in `input`, writing to `output` or returning the page
pub fn run(folio: &Folio, input: &Path, output: Option<&Path>) -> Result<Option<String>> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let blog = Blog::from_json(&json)
        .with_context(|| format!("Invalid blog JSON in {}", input.display()))?;

    let generator = Generator::new(&folio.config)?;
    let html = generator.render_blog(&blog)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, html)?;
            tracing::info!("Rendered {} -> {}", input.display(), path.display());
            Ok(None)
        }
        None => Ok(Some(html)),
    }
}
