//! HTML output for rendered blocks
//!
//! Heading, list, quote and caption text is escaped. Paragraph markup
//! produced by the inline formatter is written as it is, since it already
//! carries the `<strong>`, `<em>` and `<a>` tags.

use super::{Image, RenderUnit, Slide};
use crate::content::MarkupNode;
use crate::helpers::{asset_url, html_escape, image_tag};

/// Writes render units as HTML, resolving asset locations against the CMS
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    api_base: String,
}

impl HtmlWriter {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Render a sequence of units, in order
    pub fn units(&self, units: &[RenderUnit]) -> String {
        let mut html = String::new();
        for unit in units {
            html.push_str(&self.unit(unit));
            html.push('\n');
        }
        html
    }

    /// Render a single unit
    pub fn unit(&self, unit: &RenderUnit) -> String {
        match unit {
            RenderUnit::Prose { nodes } => {
                format!(r#"<div class="prose">{}</div>"#, nodes_html(nodes))
            }
            RenderUnit::Quote { body, citation } => {
                let cite = citation
                    .as_deref()
                    .map(|c| format!("<cite>— {}</cite>", html_escape(c)))
                    .unwrap_or_default();
                format!(
                    r#"<blockquote class="quote"><p>"{}"</p>{}</blockquote>"#,
                    html_escape(body),
                    cite
                )
            }
            RenderUnit::Figure { image, caption } => {
                let caption = caption
                    .as_deref()
                    .map(|c| format!("<figcaption>{}</figcaption>", html_escape(c)))
                    .unwrap_or_default();
                format!(
                    r#"<figure class="media">{}{}</figure>"#,
                    self.image(image),
                    caption
                )
            }
            RenderUnit::Gallery { slides } => {
                let items: String = slides.iter().map(|slide| self.slide(slide)).collect();
                format!(r#"<div class="slider">{}</div>"#, items)
            }
        }
    }

    fn slide(&self, slide: &Slide) -> String {
        let caption = slide
            .caption
            .as_deref()
            .map(|c| format!("<figcaption>{}</figcaption>", html_escape(c)))
            .unwrap_or_default();
        format!(
            r#"<figure class="slide" data-position="{}">{}{}</figure>"#,
            slide.position,
            self.image(&slide.image),
            caption
        )
    }

    fn image(&self, image: &Image) -> String {
        image_tag(&asset_url(&self.api_base, &image.location), &image.alt)
    }
}

/// Render converted rich-text nodes
pub fn nodes_html(nodes: &[MarkupNode]) -> String {
    let mut html = String::new();

    for node in nodes {
        match node {
            MarkupNode::Heading2 { text } => {
                html.push_str(&format!("<h2>{}</h2>", html_escape(text)));
            }
            MarkupNode::Heading3 { text } => {
                html.push_str(&format!("<h3>{}</h3>", html_escape(text)));
            }
            MarkupNode::Paragraph { inline_markup } => {
                html.push_str(&format!("<p>{}</p>", inline_markup));
            }
            MarkupNode::List { items } => {
                html.push_str("<ul>");
                for item in items {
                    html.push_str(&format!("<li>{}</li>", html_escape(item)));
                }
                html.push_str("</ul>");
            }
        }
    }

    html
}
