//! Generator module - builds page contexts and writes the static site

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;

use crate::api::StrapiClient;
use crate::content::{Article, Author, ContentBlock, Global, MediaAsset};
use crate::helpers::{article_path, asset_url, date_xml, encode_segment, long_date, short_date, year};
use crate::render::html::HtmlWriter;
use crate::render::{BlockRenderer, Diagnostics};
use crate::templates::{ArticleData, AuthorData, ImageData, SiteData, TemplateRenderer};
use crate::Press;

/// A rendered article page
#[derive(Debug)]
pub struct ArticlePage {
    pub html: String,
    pub diagnostics: Diagnostics,
}

/// Outcome of a full site generation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub articles: usize,
    pub skipped: usize,
    pub diagnostics: usize,
}

/// Page builder shared by the static generator and the server
pub struct Generator {
    press: Press,
    renderer: TemplateRenderer,
    blocks: BlockRenderer,
    html: HtmlWriter,
}

impl Generator {
    /// Create a new generator
    pub fn new(press: &Press) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            press: press.clone(),
            renderer,
            blocks: BlockRenderer::with_options(press.converter_options()),
            html: HtmlWriter::new(press.config.api_base()),
        })
    }

    /// Site data from the CMS global entry, falling back to the config
    pub fn site_data(&self, global: Option<&Global>) -> SiteData {
        let config = &self.press.config;
        let pick = |value: Option<&String>, fallback: &str| {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        SiteData {
            name: pick(
                global.and_then(|g| g.site_name.as_ref()),
                &config.site_name,
            ),
            description: pick(
                global.and_then(|g| g.site_description.as_ref()),
                &config.site_description,
            ),
            menu: config.menu.clone(),
            year: year(&Local::now()),
        }
    }

    /// Fetch the global entry and build site data
    ///
    /// A failing global request does not prevent rendering; the configured
    /// fallbacks are used instead.
    pub async fn load_site(&self, client: &StrapiClient) -> SiteData {
        match client.get_global().await {
            Ok(global) => self.site_data(global.as_ref()),
            Err(e) => {
                tracing::warn!("Failed to load global settings: {}", e);
                self.site_data(None)
            }
        }
    }

    /// Render article blocks to HTML, collecting diagnostics
    pub fn render_blocks(&self, blocks: &[ContentBlock]) -> (String, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let units = self.blocks.render_all(blocks, &mut diagnostics);
        (self.html.units(&units), diagnostics)
    }

    /// Template data for an article
    pub fn article_data(&self, article: &Article, content: String) -> ArticleData {
        let description = article.description.clone().filter(|d| !d.is_empty());
        let date = article.display_date();

        ArticleData {
            title: article.title.clone(),
            meta_description: description
                .clone()
                .unwrap_or_else(|| self.press.config.site_description.clone()),
            description,
            path: article_path(&article.slug),
            cover: article
                .cover
                .as_ref()
                .and_then(|cover| self.image(cover, &article.title)),
            category: article
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .filter(|name| !name.is_empty()),
            author: article.author.as_ref().map(|author| self.author(author)),
            date_long: date.as_ref().map(long_date),
            date_short: date.as_ref().map(short_date),
            datetime: date.as_ref().map(date_xml),
            content,
        }
    }

    fn author(&self, author: &Author) -> AuthorData {
        AuthorData {
            name: author.name.clone(),
            avatar: author
                .avatar
                .as_ref()
                .and_then(|avatar| self.image(avatar, &author.name)),
        }
    }

    /// Image data for a cover or avatar; alt text falls back to `fallback`
    fn image(&self, asset: &MediaAsset, fallback: &str) -> Option<ImageData> {
        let location = asset.location()?;
        let alt = asset
            .alternative_text
            .clone()
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Some(ImageData {
            src: asset_url(self.press.config.api_base(), location),
            alt,
        })
    }

    /// Render the home page
    pub fn index_page(&self, site: &SiteData, articles: &[Article]) -> Result<String> {
        let cards: Vec<ArticleData> = articles
            .iter()
            .map(|article| self.article_data(article, String::new()))
            .collect();
        self.renderer.render_index(site, &cards)
    }

    /// Render an article page
    pub fn article_page(&self, site: &SiteData, article: &Article) -> Result<ArticlePage> {
        let (content, diagnostics) = self.render_blocks(&article.blocks);
        let data = self.article_data(article, content);
        let html = self.renderer.render_article(site, &data)?;
        Ok(ArticlePage { html, diagnostics })
    }

    /// Render the not-found page
    pub fn not_found_page(&self, site: &SiteData) -> Result<String> {
        self.renderer.render_not_found(site)
    }

    /// Fetch all content and write the site to the public directory
    pub async fn generate(&self, client: &StrapiClient) -> Result<GenerateSummary> {
        let public_dir = &self.press.public_dir;
        fs::create_dir_all(public_dir)?;

        let site = self.load_site(client).await;
        let articles = client.get_articles().await?;
        tracing::info!("Loaded {} articles", articles.len());

        write_page(&public_dir.join("index.html"), &self.index_page(&site, &articles)?)?;
        write_page(&public_dir.join("404.html"), &self.not_found_page(&site)?)?;

        let mut summary = GenerateSummary::default();
        for listed in &articles {
            if listed.slug.is_empty() {
                tracing::warn!("Skipping article without slug: {:?}", listed.title);
                summary.skipped += 1;
                continue;
            }

            let article = match client.get_article(&listed.slug).await {
                Ok(Some(article)) => article,
                Ok(None) => {
                    tracing::warn!("Article {} disappeared while generating", listed.slug);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Skipping article {}: {}", listed.slug, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let page = self.article_page(&site, &article)?;
            let path = public_dir
                .join("articles")
                .join(encode_segment(&article.slug))
                .join("index.html");
            write_page(&path, &page.html)?;

            summary.articles += 1;
            summary.diagnostics += page.diagnostics.len();
        }

        Ok(summary)
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}
