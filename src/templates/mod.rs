//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Autoescaping stays on
//! for HTML templates; rendered block content is the only value marked
//! `safe`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::MenuItem;
use crate::helpers::truncate;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Register all templates
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("article.html", include_str!("site/article.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        // Register custom filters
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Home page with the article grid
    pub fn render_index(&self, site: &SiteData, articles: &[ArticleData]) -> Result<String> {
        let mut context = base_context(site);
        context.insert("articles", articles);
        self.render("index.html", &context)
    }

    /// A single article page
    pub fn render_article(&self, site: &SiteData, article: &ArticleData) -> Result<String> {
        let mut context = base_context(site);
        context.insert("article", article);
        self.render("article.html", &context)
    }

    /// Page shown for unknown articles
    pub fn render_not_found(&self, site: &SiteData) -> Result<String> {
        self.render("not_found.html", &base_context(site))
    }
}

fn base_context(site: &SiteData) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => " .....".to_string(),
    };

    Ok(tera::Value::String(truncate(&s, length, Some(&omission))))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub name: String,
    pub description: String,
    pub menu: Vec<MenuItem>,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorData {
    pub name: String,
    pub avatar: Option<ImageData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub description: Option<String>,
    pub meta_description: String,
    pub path: String,
    pub cover: Option<ImageData>,
    pub category: Option<String>,
    pub author: Option<AuthorData>,
    pub date_long: Option<String>,
    pub date_short: Option<String>,
    pub datetime: Option<String>,
    /// Rendered block HTML; empty on index cards
    pub content: String,
}
