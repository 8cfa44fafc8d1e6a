use crate::admission::{AdmissionFilter, Rejection};
use crate::content::{parse_html, tokenize};
use crate::fingerprint::{Fingerprint, FingerprintWidth};
use crate::url::normalize_link;
use std::collections::HashSet;

/// Everything derived from one page without touching shared state
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    /// Filtered tokens of the page's visible text
    pub tokens: Vec<String>,

    /// Content fingerprint; `None` when the page has no tokens
    pub fingerprint: Option<Fingerprint>,

    /// Distinct normalized links in first-occurrence order, with the
    /// admission decision for each
    pub links: Vec<(String, Result<(), Rejection>)>,
}

impl PageAnalysis {
    /// Links that passed the admission filter
    pub fn admitted(&self) -> impl Iterator<Item = &str> {
        self.links
            .iter()
            .filter(|(_, decision)| decision.is_ok())
            .map(|(url, _)| url.as_str())
    }
}

/// Parses, tokenizes and fingerprints a page and filters its links
///
/// Each anchor is resolved against `page_url` and fragment-stripped before
/// the filter sees it. Repeated links on the same page are evaluated once.
pub fn analyze(
    page_url: &str,
    html: &str,
    filter: &AdmissionFilter,
    width: FingerprintWidth,
) -> PageAnalysis {
    let parsed = parse_html(html);
    let tokens = tokenize(&parsed.text);

    let fingerprint = if tokens.is_empty() {
        None
    } else {
        Some(Fingerprint::from_tokens(&tokens, width))
    };

    let mut seen = HashSet::new();
    let links = parsed
        .hrefs
        .iter()
        .map(|href| normalize_link(href, page_url))
        .filter(|link| seen.insert(link.clone()))
        .map(|link| {
            let decision = filter.check(&link);
            (link, decision)
        })
        .collect();

    PageAnalysis {
        tokens,
        fingerprint,
        links,
    }
}
