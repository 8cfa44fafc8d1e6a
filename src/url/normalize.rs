use crate::UrlError;
use url::Url;

/// Resolves a link against the page it appeared on and strips its fragment
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace from the href
/// 2. Resolve it against `base` (absolute links pass through, scheme-relative
///    and path-relative references are joined)
/// 3. Drop everything from the first `#`
///
/// This never fails. When neither the base nor the href can be parsed the
/// href itself is returned without its fragment, and the admission filter
/// rejects it later.
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::normalize_link;
///
/// let url = normalize_link("/y#frag", "http://ics.uci.edu/a/b");
/// assert_eq!(url, "http://ics.uci.edu/y");
///
/// let url = normalize_link("//stat.uci.edu/z", "https://ics.uci.edu/");
/// assert_eq!(url, "https://stat.uci.edu/z");
/// ```
pub fn normalize_link(href: &str, base: &str) -> String {
    let href = href.trim();

    let resolved = match Url::parse(base) {
        Ok(base_url) => base_url.join(href).ok(),
        Err(_) => Url::parse(href).ok(),
    };

    match resolved {
        Some(mut url) => {
            url.set_fragment(None);
            url.into()
        }
        None => strip_fragment(href).to_string(),
    }
}

/// Parses a normalized URL string into a structured URL
///
/// The admission filter treats an error here as a rejection rather than a
/// crawl failure.
pub fn parse_link(url_str: &str) -> Result<Url, UrlError> {
    Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))
}

fn strip_fragment(s: &str) -> &str {
    match s.find('#') {
        Some(idx) => &s[..idx],
        None => s,
    }
}
