//! Render blocks from a local JSON file, without contacting the CMS

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{Article, Collection, ContentBlock, Single};
use crate::generator::Generator;
use crate::render::Diagnostics;
use crate::Press;

/// Read blocks from JSON
///
/// Accepts a bare array of blocks, a single article object, or an API
/// response. A collection response uses its first article; a single-entry
/// response uses its `data` object.
pub fn parse_blocks(json: &str) -> Result<Vec<ContentBlock>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let blocks: Vec<ContentBlock> = if value.is_array() {
        serde_json::from_value(value)?
    } else if value.get("data").is_some_and(serde_json::Value::is_object) {
        let single: Single<Article> = serde_json::from_value(value)?;
        single.data.map(|article| article.blocks).unwrap_or_default()
    } else if value.get("data").is_some() {
        let collection: Collection<Article> = serde_json::from_value(value)?;
        collection
            .into_first()
            .map(|article| article.blocks)
            .unwrap_or_default()
    } else {
        let article: Article = serde_json::from_value(value)?;
        article.blocks
    };

    Ok(blocks)
}

/// Render the blocks stored in `path` to HTML
pub fn render_file(press: &Press, path: &Path) -> Result<(String, Diagnostics)> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let blocks = parse_blocks(&json).with_context(|| format!("Invalid block data in {:?}", path))?;
    tracing::debug!("Read {} blocks from {:?}", blocks.len(), path);

    let generator = Generator::new(press)?;
    Ok(generator.render_blocks(&blocks))
}

/// Render a block file to stdout or to `output`
pub fn run(press: &Press, input: &Path, output: Option<&Path>) -> Result<()> {
    let (html, diagnostics) = render_file(press, input)?;

    match output {
        Some(path) => {
            fs::write(path, &html)?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", html),
    }

    if !diagnostics.is_empty() {
        eprintln!("{} block(s) rendered nothing:", diagnostics.len());
        for diagnostic in diagnostics.iter() {
            eprintln!("  - {}", diagnostic);
        }
    }

    Ok(())
}
