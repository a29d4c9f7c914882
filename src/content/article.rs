//! CMS entry models and response envelopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::{null_as_default, ContentBlock, MediaAsset};

/// A blog article
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub document_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,

    #[serde(default)]
    pub cover: Option<MediaAsset>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub category: Option<Category>,

    /// Dynamic-zone content, in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Date shown to readers: publication date, else creation date
    pub fn display_date(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }

    /// Combine an article fetched with populated blocks and one fetched
    /// with populated relations
    ///
    /// Every field comes from `main` except `blocks`, which comes from
    /// `with_blocks`.
    pub fn merge_blocks(main: Article, with_blocks: Article) -> Article {
        Article {
            blocks: with_blocks.blocks,
            ..main
        }
    }
}

/// An article author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<MediaAsset>,
}

/// An article category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Site-wide settings single type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Global {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_description: Option<String>,
    #[serde(default)]
    pub favicon: Option<MediaAsset>,
}

/// `{ "data": [...] }` envelope of a collection endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
}

impl<T> Collection<T> {
    pub fn into_first(self) -> Option<T> {
        self.data.into_iter().next()
    }
}

/// `{ "data": {...} }` envelope of a single-type endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Single<T> {
    #[serde(default)]
    pub data: Option<T>,
}
