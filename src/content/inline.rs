//! Inline formatting for rich-text paragraph lines
//!
//! Three substitutions run in a fixed order over a single line:
//! `**bold**`, then `*italic*`, then `[text](target)`. Each rule only
//! looks at text no earlier rule has already turned into markup, so a
//! substituted span is never rescanned.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::helpers::html_escape;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern");
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").expect("valid italic pattern");
    static ref LINK: Regex = Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link pattern");
}

/// A piece of a line, either untouched source text or emitted markup
#[derive(Debug)]
enum Segment {
    Text(String),
    Markup(String),
}

/// Applies bold, italic and link substitutions to one line
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFormatter {
    escape_html: bool,
}

impl InlineFormatter {
    /// Formatter that passes source text through unescaped
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter that escapes source text, including captured spans
    pub fn escaping() -> Self {
        Self { escape_html: true }
    }

    /// Format a single line into markup-bearing text
    pub fn format(&self, line: &str) -> String {
        let segments = vec![Segment::Text(line.to_string())];

        let segments = self.apply(segments, &BOLD, |caps, this| {
            format!("<strong>{}</strong>", this.text(&caps[1]))
        });
        let segments = self.apply(segments, &ITALIC, |caps, this| {
            format!("<em>{}</em>", this.text(&caps[1]))
        });
        let segments = self.apply(segments, &LINK, |caps, this| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                this.text(&caps[2]),
                this.text(&caps[1])
            )
        });

        let mut output = String::with_capacity(line.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => output.push_str(&self.text(&text)),
                Segment::Markup(markup) => output.push_str(&markup),
            }
        }
        output
    }

    fn text(&self, s: &str) -> String {
        if self.escape_html {
            html_escape(s)
        } else {
            s.to_string()
        }
    }

    /// Run one rule over every text segment, leaving markup untouched
    fn apply<F>(&self, segments: Vec<Segment>, rule: &Regex, build: F) -> Vec<Segment>
    where
        F: Fn(&Captures, &Self) -> String,
    {
        let mut result = Vec::with_capacity(segments.len());

        for segment in segments {
            let text = match segment {
                Segment::Text(text) => text,
                markup => {
                    result.push(markup);
                    continue;
                }
            };

            let mut last = 0;
            for caps in rule.captures_iter(&text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                if whole.start() > last {
                    result.push(Segment::Text(text[last..whole.start()].to_string()));
                }
                result.push(Segment::Markup(build(&caps, self)));
                last = whole.end();
            }
            if last < text.len() {
                result.push(Segment::Text(text[last..].to_string()));
            }
        }

        result
    }
}

/// Format a line with the default, non-escaping formatter
pub fn format_inline(line: &str) -> String {
    InlineFormatter::new().format(line)
}
