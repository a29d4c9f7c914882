//! Content blocks of an article's dynamic zone

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Component tag of a rich-text block
pub const RICH_TEXT: &str = "shared.rich-text";
/// Component tag of a quote block
pub const QUOTE: &str = "shared.quote";
/// Component tag of a single media block
pub const MEDIA: &str = "shared.media";
/// Component tag of a media slider block
pub const SLIDER: &str = "shared.slider";

/// Treat an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An uploaded media file, as populated by the CMS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl MediaAsset {
    /// Create an asset with only a location
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// The asset's location, if it has one
    pub fn location(&self) -> Option<&str> {
        if self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }

    /// Caption, ignoring empty values
    pub fn caption(&self) -> Option<&str> {
        non_empty(self.caption.as_deref())
    }

    /// Alt text: alternative text, then name, then caption, then `fallback`
    pub fn alt_text(&self, fallback: &str) -> String {
        non_empty(self.alternative_text.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .or_else(|| non_empty(self.caption.as_deref()))
            .unwrap_or(fallback)
            .to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read a block field, falling back to the default when it is null or has
/// the wrong shape
///
/// A malformed field empties that one field; the block and its siblings
/// still deserialize.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    match serde_json::from_value(value) {
        Ok(field) => Ok(field),
        Err(e) => {
            tracing::warn!("Ignoring malformed block field: {}", e);
            Ok(T::default())
        }
    }
}

#[derive(Debug, Deserialize)]
struct RichTextFields {
    #[serde(default, deserialize_with = "lenient")]
    body: String,
}

#[derive(Debug, Deserialize)]
struct QuoteFields {
    #[serde(default, deserialize_with = "lenient")]
    body: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaFields {
    #[serde(default, deserialize_with = "lenient")]
    file: Option<MediaAsset>,
}

#[derive(Debug, Deserialize)]
struct SliderFields {
    #[serde(default, deserialize_with = "lenient")]
    files: Vec<MediaAsset>,
}

/// One unit of article content, discriminated by its `__component` tag
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    RichText {
        body: String,
    },
    Quote {
        body: String,
        title: Option<String>,
    },
    Media {
        file: Option<MediaAsset>,
    },
    Slider {
        files: Vec<MediaAsset>,
    },
    /// A component this renderer does not know about
    Unknown {
        component: String,
    },
}

impl ContentBlock {
    /// The component tag this block was read from
    pub fn component(&self) -> &str {
        match self {
            ContentBlock::RichText { .. } => RICH_TEXT,
            ContentBlock::Quote { .. } => QUOTE,
            ContentBlock::Media { .. } => MEDIA,
            ContentBlock::Slider { .. } => SLIDER,
            ContentBlock::Unknown { component } => component,
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let component = value
            .get("__component")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        let block = match component.as_str() {
            RICH_TEXT => {
                let fields: RichTextFields = serde_json::from_value(value)?;
                ContentBlock::RichText { body: fields.body }
            }
            QUOTE => {
                let fields: QuoteFields = serde_json::from_value(value)?;
                ContentBlock::Quote {
                    body: fields.body,
                    title: fields.title,
                }
            }
            MEDIA => {
                let fields: MediaFields = serde_json::from_value(value)?;
                ContentBlock::Media { file: fields.file }
            }
            SLIDER => {
                let fields: SliderFields = serde_json::from_value(value)?;
                ContentBlock::Slider {
                    files: fields.files,
                }
            }
            _ => ContentBlock::Unknown { component },
        };

        Ok(block)
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        ContentBlock::from_value(value).map_err(de::Error::custom)
    }
}
