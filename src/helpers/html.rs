//! HTML helper functions

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("http://localhost:1337/uploads/a.png", "A sunset")
/// ```
pub fn image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" loading="lazy">"#,
        html_escape(src),
        html_escape(alt)
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate a string to a number of characters
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}
