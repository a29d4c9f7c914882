//! Helper functions for page rendering
//!
//! HTML escaping and tag builders, asset and article URLs, and the date
//! formats shown on index and article pages.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
