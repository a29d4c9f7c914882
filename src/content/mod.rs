//! Content module - CMS entries, blocks, and rich-text conversion

pub mod article;
pub mod block;
mod inline;
mod markdown;

pub use article::{Article, Author, Category, Collection, Global, Single};
pub use block::{ContentBlock, MediaAsset};
pub use inline::{format_inline, InlineFormatter};
pub use markdown::{convert, ConverterOptions, MarkdownConverter, MarkupNode};
