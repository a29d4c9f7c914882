//! Block rendering
//!
//! [`BlockRenderer`] maps each [`ContentBlock`] to a [`RenderUnit`], a
//! small document tree that [`html`] turns into markup. Malformed media
//! blocks never fail the page: they are reported as a [`BlockDiagnostic`]
//! and render nothing, while their siblings render normally. Blocks with
//! an unknown component tag are skipped silently.

pub mod html;

use serde::Serialize;
use thiserror::Error;

use crate::content::{ContentBlock, ConverterOptions, MarkdownConverter, MarkupNode, MediaAsset};

/// Final alt-text fallback for a single media block
const MEDIA_ALT: &str = "Media";

/// A non-fatal problem found while rendering a block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockDiagnostic {
    #[error("media block has no file data")]
    MissingMedia,

    #[error("slider block has no files")]
    EmptySlider,

    #[error("slider file {position} has no url")]
    SlideWithoutUrl { position: usize },
}

/// Collects diagnostics reported while rendering
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<BlockDiagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a diagnostic and keep it
    pub fn report(&mut self, component: &str, diagnostic: BlockDiagnostic) {
        tracing::warn!(component, "{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDiagnostic> {
        self.entries.iter()
    }
}

/// An image ready to be placed on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Asset location as stored by the CMS
    pub location: String,
    pub alt: String,
}

/// One picture of a slider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// 1-based position in the slider's file list
    pub position: usize,
    pub image: Image,
    pub caption: Option<String>,
}

/// Rendered form of one content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderUnit {
    /// Converted rich text inside a typographic container
    Prose { nodes: Vec<MarkupNode> },
    Quote {
        body: String,
        citation: Option<String>,
    },
    Figure {
        image: Image,
        caption: Option<String>,
    },
    Gallery { slides: Vec<Slide> },
}

/// Dispatches content blocks to their renderers
#[derive(Debug, Clone, Default)]
pub struct BlockRenderer {
    converter: MarkdownConverter,
}

impl BlockRenderer {
    /// Create a renderer with the default conversion options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom conversion options
    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            converter: MarkdownConverter::with_options(options),
        }
    }

    /// Render one block, or `None` when it produces no output
    pub fn render(
        &self,
        block: &ContentBlock,
        diagnostics: &mut Diagnostics,
    ) -> Option<RenderUnit> {
        match block {
            ContentBlock::RichText { body } => Some(RenderUnit::Prose {
                nodes: self.converter.convert(body),
            }),
            ContentBlock::Quote { body, title } => Some(RenderUnit::Quote {
                body: body.clone(),
                citation: title.clone().filter(|t| !t.is_empty()),
            }),
            ContentBlock::Media { file } => {
                let unit = file.as_ref().and_then(|asset| {
                    let image = image_for(asset, MEDIA_ALT)?;
                    Some(RenderUnit::Figure {
                        image,
                        caption: asset.caption().map(str::to_string),
                    })
                });
                if unit.is_none() {
                    diagnostics.report(block.component(), BlockDiagnostic::MissingMedia);
                }
                unit
            }
            ContentBlock::Slider { files } => {
                if files.is_empty() {
                    diagnostics.report(block.component(), BlockDiagnostic::EmptySlider);
                    return None;
                }

                let mut slides = Vec::with_capacity(files.len());
                for (index, asset) in files.iter().enumerate() {
                    let position = index + 1;
                    match image_for(asset, &format!("Slide {}", position)) {
                        Some(image) => slides.push(Slide {
                            position,
                            image,
                            caption: asset.caption().map(str::to_string),
                        }),
                        None => diagnostics.report(
                            block.component(),
                            BlockDiagnostic::SlideWithoutUrl { position },
                        ),
                    }
                }
                Some(RenderUnit::Gallery { slides })
            }
            ContentBlock::Unknown { component } => {
                tracing::trace!(component = %component, "skipping unsupported block");
                None
            }
        }
    }

    /// Render blocks in order, dropping those without output
    pub fn render_all(
        &self,
        blocks: &[ContentBlock],
        diagnostics: &mut Diagnostics,
    ) -> Vec<RenderUnit> {
        blocks
            .iter()
            .filter_map(|block| self.render(block, diagnostics))
            .collect()
    }
}

fn image_for(asset: &MediaAsset, fallback_alt: &str) -> Option<Image> {
    let location = asset.location()?;
    Some(Image {
        location: location.to_string(),
        alt: asset.alt_text(fallback_alt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(block: &ContentBlock) -> (Option<RenderUnit>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let unit = BlockRenderer::new().render(block, &mut diagnostics);
        (unit, diagnostics)
    }

    #[test]
    fn test_rich_text_delegates_to_converter() {
        let (unit, diagnostics) = render(&ContentBlock::RichText {
            body: "## Hi\ntext".to_string(),
        });
        assert_eq!(
            unit,
            Some(RenderUnit::Prose {
                nodes: vec![
                    MarkupNode::Heading2 {
                        text: "Hi".to_string()
                    },
                    MarkupNode::Paragraph {
                        inline_markup: "text".to_string()
                    },
                ]
            })
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_quote_body_not_converted() {
        let (unit, _) = render(&ContentBlock::Quote {
            body: "**as is**".to_string(),
            title: Some(String::new()),
        });
        assert_eq!(
            unit,
            Some(RenderUnit::Quote {
                body: "**as is**".to_string(),
                citation: None
            })
        );
    }

    #[test]
    fn test_media_with_caption() {
        let mut asset = MediaAsset::new("/uploads/a.png");
        asset.caption = Some("Dusk".to_string());
        let (unit, diagnostics) = render(&ContentBlock::Media { file: Some(asset) });
        assert_eq!(
            unit,
            Some(RenderUnit::Figure {
                image: Image {
                    location: "/uploads/a.png".to_string(),
                    alt: "Dusk".to_string()
                },
                caption: Some("Dusk".to_string())
            })
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_media_alt_falls_back_to_literal() {
        let (unit, _) = render(&ContentBlock::Media {
            file: Some(MediaAsset::new("/a.png")),
        });
        match unit {
            Some(RenderUnit::Figure { image, caption }) => {
                assert_eq!(image.alt, "Media");
                assert_eq!(caption, None);
            }
            other => panic!("unexpected unit: {:?}", other),
        }
    }

    #[test]
    fn test_media_without_file_reports() {
        let (unit, diagnostics) = render(&ContentBlock::Media { file: None });
        assert_eq!(unit, None);
        assert_eq!(
            diagnostics.iter().collect::<Vec<_>>(),
            vec![&BlockDiagnostic::MissingMedia]
        );

        let (unit, diagnostics) = render(&ContentBlock::Media {
            file: Some(MediaAsset::new("")),
        });
        assert_eq!(unit, None);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_slider_skips_files_without_url() {
        let files = vec![
            MediaAsset::new("/a.png"),
            MediaAsset::new(""),
            MediaAsset::new("/c.png"),
        ];
        let (unit, diagnostics) = render(&ContentBlock::Slider { files });

        let slides = match unit {
            Some(RenderUnit::Gallery { slides }) => slides,
            other => panic!("unexpected unit: {:?}", other),
        };
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].position, 1);
        assert_eq!(slides[0].image.alt, "Slide 1");
        assert_eq!(slides[1].position, 3);
        assert_eq!(slides[1].image.alt, "Slide 3");
        assert_eq!(
            diagnostics.iter().collect::<Vec<_>>(),
            vec![&BlockDiagnostic::SlideWithoutUrl { position: 2 }]
        );
    }

    #[test]
    fn test_empty_slider_reports() {
        let (unit, diagnostics) = render(&ContentBlock::Slider { files: Vec::new() });
        assert_eq!(unit, None);
        assert_eq!(
            diagnostics.iter().collect::<Vec<_>>(),
            vec![&BlockDiagnostic::EmptySlider]
        );
    }

    #[test]
    fn test_unknown_block_is_silent() {
        let (unit, diagnostics) = render(&ContentBlock::Unknown {
            component: "shared.unsupported".to_string(),
        });
        assert_eq!(unit, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_render_all_keeps_order() {
        let blocks = vec![
            ContentBlock::Quote {
                body: "first".to_string(),
                title: None,
            },
            ContentBlock::Media { file: None },
            ContentBlock::Unknown {
                component: "shared.seo".to_string(),
            },
            ContentBlock::RichText {
                body: "last".to_string(),
            },
        ];
        let mut diagnostics = Diagnostics::new();
        let units = BlockRenderer::new().render_all(&blocks, &mut diagnostics);

        assert_eq!(units.len(), 2);
        assert!(matches!(units[0], RenderUnit::Quote { .. }));
        assert!(matches!(units[1], RenderUnit::Prose { .. }));
        assert_eq!(diagnostics.len(), 1);
    }
}
