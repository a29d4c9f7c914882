//! strapi-press: renders Strapi CMS articles as HTML pages
//!
//! Articles, authors, categories and the site's global settings are fetched
//! from the Strapi REST API. Each article's dynamic-zone blocks are mapped
//! to HTML by [`render::BlockRenderer`]; rich-text blocks go through the
//! markdown-subset converter in [`content`]. Pages are rendered with
//! embedded Tera templates and either served live or written to disk.

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application
#[derive(Debug, Clone)]
pub struct Press {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Press {
    /// Create a new instance from a directory, applying environment overrides
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Client for the configured CMS
    pub fn client(&self) -> Result<api::StrapiClient> {
        Ok(api::StrapiClient::new(
            self.config.api_base(),
            self.config.request_timeout(),
        )?)
    }

    /// Rich-text conversion options from the configuration
    pub fn converter_options(&self) -> content::ConverterOptions {
        content::ConverterOptions::from(&self.config.markdown)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
