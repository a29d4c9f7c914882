//! Strapi REST client
//!
//! [`StrapiClient`] wraps a [`reqwest::Client`] and the CMS base URL and
//! exposes typed calls for the content this site renders. Responses are
//! never cached; every call goes to the CMS.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ApiError;
use crate::content::{Article, Author, Category, Collection, Global, Single};

const SLUG_FILTER: &str = "filters[slug][$eq]";

/// HTTP client for the Strapi content API
#[derive(Debug, Clone)]
pub struct StrapiClient {
    /// Shared HTTP client
    http: Client,
    /// CMS base URL, without trailing slash
    base_url: String,
}

impl StrapiClient {
    /// Create a client for the CMS at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// CMS base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All articles with their first-level relations
    pub async fn get_articles(&self) -> Result<Vec<Article>, ApiError> {
        let response: Collection<Article> =
            self.fetch("/articles", &[("populate", "*")]).await?;
        Ok(response.data)
    }

    /// One article by slug, with both its relations and its block media
    ///
    /// Strapi cannot populate the article's relations and the media inside
    /// its dynamic-zone blocks in one query, so two queries run
    /// concurrently and the blocks of the second replace those of the
    /// first.
    pub async fn get_article(&self, slug: &str) -> Result<Option<Article>, ApiError> {
        let blocks_query = [(SLUG_FILTER, slug), ("populate[blocks][populate]", "*")];
        let main_query = [(SLUG_FILTER, slug), ("populate", "*")];

        let (with_blocks, main) = tokio::try_join!(
            self.fetch::<Collection<Article>>("/articles", &blocks_query),
            self.fetch::<Collection<Article>>("/articles", &main_query),
        )?;

        let article = match (main.into_first(), with_blocks.into_first()) {
            (Some(main), Some(with_blocks)) => Some(Article::merge_blocks(main, with_blocks)),
            (main, with_blocks) => with_blocks.or(main),
        };

        if article.is_none() {
            debug!(slug = %slug, "article not found");
        }
        Ok(article)
    }

    /// Site-wide settings
    pub async fn get_global(&self) -> Result<Option<Global>, ApiError> {
        let response: Single<Global> = self.fetch("/global", &[("populate", "*")]).await?;
        Ok(response.data)
    }

    /// All authors
    pub async fn get_authors(&self) -> Result<Vec<Author>, ApiError> {
        let response: Collection<Author> = self.fetch("/authors", &[("populate", "*")]).await?;
        Ok(response.data)
    }

    /// All categories
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response: Collection<Category> =
            self.fetch("/categories", &[("populate", "*")]).await?;
        Ok(response.data)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/api{}", self.base_url, path);

        debug!(url = %url, ?query, "fetching");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("API error ({}) for {}: {}", status.as_u16(), url, body);
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
