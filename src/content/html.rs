//! HTML parser for extracting links and visible text
//!
//! This module handles parsing a fetched page to extract:
//! - Raw `href` values from `<a>` tags, in document order
//! - The page's visible text, for tokenizing

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never shown to a reader
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Every anchor `href`, unresolved, in document order
    pub hrefs: Vec<String>,

    /// Visible text with text nodes separated by whitespace
    pub text: String,
}

/// Parses HTML content and extracts anchor hrefs and visible text
///
/// Links are returned exactly as written; resolving and filtering them is the
/// caller's job.
///
/// # Example
///
/// ```
/// use sumi_sieve::content::parse_html;
///
/// let html = r#"<html><body><p>Hello</p><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.hrefs, vec!["/page".to_string()]);
/// assert!(parsed.text.contains("Hello"));
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        hrefs: extract_hrefs(&document),
        text: extract_text(&document),
    }
}

fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

fn extract_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|element| INVISIBLE_ELEMENTS.contains(&element.value().name()));
        if hidden {
            continue;
        }

        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(fragment);
    }

    text
}
