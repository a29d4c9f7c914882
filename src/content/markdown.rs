//! Rich-text body conversion
//!
//! Converts the small markdown subset used by rich-text blocks into a flat
//! list of [`MarkupNode`]s. The format is line based: `## ` and `### `
//! headings, `- ` list items, and paragraphs made of consecutive lines
//! separated by blank lines. Paragraph lines go through the
//! [`InlineFormatter`]; heading and list text is kept verbatim.
//!
//! The scan is a single pass over three states:
//!
//! | state        | heading                        | list item            | text / blank                      |
//! |--------------|--------------------------------|----------------------|-----------------------------------|
//! | Idle         | emit heading                   | start list           | start paragraph / ignore          |
//! | Paragraph    | emit paragraph, emit heading   | emit paragraph, start list | append / emit paragraph     |
//! | List         | emit heading, list stays open  | append item          | emit list, then as Idle           |
//!
//! With [`ConverterOptions::flush_list_on_heading`] the list is emitted
//! before the heading instead.

use serde::Serialize;

use super::inline::InlineFormatter;
use crate::config::MarkdownConfig;

/// One structural element of a converted body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    Heading2 { text: String },
    Heading3 { text: String },
    /// Paragraph text with inline markup already applied
    Paragraph { inline_markup: String },
    List { items: Vec<String> },
}

/// Converter behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Emit a pending list before a heading rather than after it
    pub flush_list_on_heading: bool,
    /// HTML-escape paragraph source text
    pub escape_html: bool,
}

impl From<&MarkdownConfig> for ConverterOptions {
    fn from(config: &MarkdownConfig) -> Self {
        Self {
            flush_list_on_heading: config.flush_list_on_heading,
            escape_html: config.escape_html,
        }
    }
}

/// How a single source line is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Heading2(&'a str),
    Heading3(&'a str),
    ListItem(&'a str),
    Blank,
    Text(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(text) = line.strip_prefix("## ") {
        return LineKind::Heading2(text);
    }
    if let Some(text) = line.strip_prefix("### ") {
        return LineKind::Heading3(text);
    }

    let trimmed = line.trim();
    if let Some(item) = trimmed.strip_prefix("- ") {
        LineKind::ListItem(item)
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(line)
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    Paragraph(Vec<String>),
    List(Vec<String>),
}

/// Converts rich-text bodies into markup nodes
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: ConverterOptions,
    inline: InlineFormatter,
}

impl MarkdownConverter {
    /// Create a converter with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    pub fn with_options(options: ConverterOptions) -> Self {
        let inline = if options.escape_html {
            InlineFormatter::escaping()
        } else {
            InlineFormatter::new()
        };
        Self { options, inline }
    }

    pub fn options(&self) -> ConverterOptions {
        self.options
    }

    /// Convert a body into nodes in source order
    pub fn convert(&self, body: &str) -> Vec<MarkupNode> {
        let mut scan = Scan::default();

        for line in body.split('\n') {
            match classify(line) {
                LineKind::Heading2(text) => {
                    self.before_heading(&mut scan);
                    scan.nodes.push(MarkupNode::Heading2 {
                        text: text.to_string(),
                    });
                }
                LineKind::Heading3(text) => {
                    self.before_heading(&mut scan);
                    scan.nodes.push(MarkupNode::Heading3 {
                        text: text.to_string(),
                    });
                }
                LineKind::ListItem(item) => match &mut scan.state {
                    ScanState::List(items) => items.push(item.to_string()),
                    _ => {
                        scan.flush_paragraph();
                        scan.state = ScanState::List(vec![item.to_string()]);
                    }
                },
                LineKind::Text(line) => {
                    scan.flush_list();
                    let formatted = self.inline.format(line);
                    match &mut scan.state {
                        ScanState::Paragraph(lines) => lines.push(formatted),
                        _ => scan.state = ScanState::Paragraph(vec![formatted]),
                    }
                }
                LineKind::Blank => {
                    scan.flush_list();
                    scan.flush_paragraph();
                }
            }
        }

        scan.finish()
    }

    fn before_heading(&self, scan: &mut Scan) {
        scan.flush_paragraph();
        if self.options.flush_list_on_heading {
            scan.flush_list();
        }
    }
}

/// Working state of one conversion
#[derive(Debug, Default)]
struct Scan {
    state: ScanState,
    nodes: Vec<MarkupNode>,
}

impl Scan {
    fn flush_paragraph(&mut self) {
        if matches!(self.state, ScanState::Paragraph(_)) {
            if let ScanState::Paragraph(lines) = std::mem::take(&mut self.state) {
                self.nodes.push(MarkupNode::Paragraph {
                    inline_markup: lines.join(" "),
                });
            }
        }
    }

    fn flush_list(&mut self) {
        if matches!(self.state, ScanState::List(_)) {
            if let ScanState::List(items) = std::mem::take(&mut self.state) {
                self.nodes.push(MarkupNode::List { items });
            }
        }
    }

    fn finish(mut self) -> Vec<MarkupNode> {
        self.flush_paragraph();
        self.flush_list();
        self.nodes
    }
}

/// Convert a body with the default options
pub fn convert(body: &str) -> Vec<MarkupNode> {
    MarkdownConverter::new().convert(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(s: &str) -> MarkupNode {
        MarkupNode::Paragraph {
            inline_markup: s.to_string(),
        }
    }

    fn list(items: &[&str]) -> MarkupNode {
        MarkupNode::List {
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn h2(s: &str) -> MarkupNode {
        MarkupNode::Heading2 {
            text: s.to_string(),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("## Title"), LineKind::Heading2("Title"));
        assert_eq!(classify("### Sub"), LineKind::Heading3("Sub"));
        assert_eq!(classify("#### Deep"), LineKind::Text("#### Deep"));
        assert_eq!(classify("##Title"), LineKind::Text("##Title"));
        assert_eq!(classify("  - item  "), LineKind::ListItem("item"));
        assert_eq!(classify("-item"), LineKind::Text("-item"));
        assert_eq!(classify(" \t "), LineKind::Blank);
        assert_eq!(classify(" ## not heading"), LineKind::Text(" ## not heading"));
    }

    #[test]
    fn test_empty_bodies() {
        assert!(convert("").is_empty());
        assert!(convert("\n\n\n").is_empty());
        assert!(convert("   \n\t\n").is_empty());
    }

    #[test]
    fn test_single_paragraph_joins_lines() {
        assert_eq!(
            convert("first line\nsecond *line*\nthird"),
            vec![paragraph("first line second <em>line</em> third")]
        );
    }

    #[test]
    fn test_heading_text_not_trimmed() {
        assert_eq!(convert("## Title"), vec![h2("Title")]);
        assert_eq!(convert("##  Title"), vec![h2(" Title")]);
        assert_eq!(
            convert("### **Sub**"),
            vec![MarkupNode::Heading3 {
                text: "**Sub**".to_string()
            }]
        );
    }

    #[test]
    fn test_heading_flushes_paragraph() {
        assert_eq!(
            convert("intro\n## Next\nbody"),
            vec![paragraph("intro"), h2("Next"), paragraph("body")]
        );
    }

    #[test]
    fn test_blank_line_flushes_list() {
        assert_eq!(
            convert("- a\n- b\n\ntext"),
            vec![list(&["a", "b"]), paragraph("text")]
        );
    }

    #[test]
    fn test_text_line_flushes_list() {
        assert_eq!(
            convert("- a\ntext\n- b"),
            vec![list(&["a"]), paragraph("text"), list(&["b"])]
        );
    }

    #[test]
    fn test_list_flushes_paragraph() {
        assert_eq!(
            convert("lead in\n- one\n  - two"),
            vec![paragraph("lead in"), list(&["one", "two"])]
        );
    }

    #[test]
    fn test_list_items_not_formatted() {
        assert_eq!(convert("- **x**"), vec![list(&["**x**"])]);
    }

    #[test]
    fn test_heading_keeps_list_open() {
        assert_eq!(
            convert("- a\n## H\n- b\ntext"),
            vec![h2("H"), list(&["a", "b"]), paragraph("text")]
        );
    }

    #[test]
    fn test_heading_flushes_list_when_enabled() {
        let converter = MarkdownConverter::with_options(ConverterOptions {
            flush_list_on_heading: true,
            ..Default::default()
        });
        assert_eq!(
            converter.convert("- a\n## H\n- b\ntext"),
            vec![list(&["a"]), h2("H"), list(&["b"]), paragraph("text")]
        );
    }

    #[test]
    fn test_escape_html_option() {
        let converter = MarkdownConverter::with_options(ConverterOptions {
            escape_html: true,
            ..Default::default()
        });
        assert_eq!(
            converter.convert("<img src=x onerror=alert(1)> **hi**"),
            vec![paragraph(
                "&lt;img src=x onerror=alert(1)&gt; <strong>hi</strong>"
            )]
        );
    }

    #[test]
    fn test_mixed_document() {
        let body = "## Intro\nWelcome to **the** blog.\nRead [more](/about).\n\n### Points\n- fast\n- small\n\nBye";
        assert_eq!(
            convert(body),
            vec![
                h2("Intro"),
                paragraph(
                    r#"Welcome to <strong>the</strong> blog. Read <a href="/about" target="_blank" rel="noopener noreferrer">more</a>."#
                ),
                MarkupNode::Heading3 {
                    text: "Points".to_string()
                },
                list(&["fast", "small"]),
                paragraph("Bye"),
            ]
        );
    }

    #[test]
    fn test_options_from_config() {
        let config = MarkdownConfig {
            flush_list_on_heading: true,
            escape_html: false,
        };
        let options = ConverterOptions::from(&config);
        assert!(options.flush_list_on_heading);
        assert!(!options.escape_html);
    }
}
