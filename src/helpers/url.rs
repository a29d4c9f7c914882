//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone when a slug is placed in a path segment
const SLUG_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Resolve an uploaded asset's location against the CMS base URL
///
/// Relative upload paths are served by the CMS itself; absolute URLs
/// (external upload providers) are used as they are.
///
/// # Examples
/// ```ignore
/// asset_url("http://localhost:1337", "/uploads/a.png") // -> "http://localhost:1337/uploads/a.png"
/// ```
pub fn asset_url(api_base: &str, location: &str) -> String {
    if location.starts_with("http://")
        || location.starts_with("https://")
        || location.starts_with("//")
    {
        location.to_string()
    } else {
        format!("{}{}", api_base.trim_end_matches('/'), location)
    }
}

/// Site path of an article page
///
/// # Examples
/// ```ignore
/// article_path("hello-world") // -> "/articles/hello-world"
/// ```
pub fn article_path(slug: &str) -> String {
    format!("/articles/{}", encode_segment(slug))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SLUG_SET).to_string()
}
