//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `api_url`
pub const API_URL_ENV: &str = "STRAPI_API_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // CMS
    pub api_url: String,
    pub request_timeout_secs: u64,

    // Site fallbacks, used when the CMS global entry has no value
    pub site_name: String,
    pub site_description: String,

    // Navigation
    pub menu: Vec<MenuItem>,

    // Directory
    pub public_dir: String,

    // Rendering
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:1337".to_string(),
            request_timeout_secs: 30,

            site_name: "Strapi Blog".to_string(),
            site_description: "A blog made with Strapi".to_string(),

            menu: vec![
                MenuItem {
                    name: "Home".to_string(),
                    path: "/".to_string(),
                },
                MenuItem {
                    name: "About".to_string(),
                    path: "/about".to_string(),
                },
            ],

            public_dir: "public".to_string(),

            markdown: MarkdownConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_api_url_override(std::env::var(API_URL_ENV).ok());
    }

    fn apply_api_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using {} from environment: {}", API_URL_ENV, url);
            self.api_url = url;
        }
    }

    /// API base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Timeout applied to every CMS request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Navigation menu entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

/// Rich-text conversion options
///
/// Both flags default to `false`, which reproduces the historical output
/// of the rich-text renderer byte for byte.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Close a pending list before emitting a heading
    pub flush_list_on_heading: bool,
    /// Escape HTML in paragraph text before inline formatting
    pub escape_html: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}
