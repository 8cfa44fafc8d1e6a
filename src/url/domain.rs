use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::extract_host;
///
/// let url = Url::parse("https://VISION.ics.uci.edu/path").unwrap();
/// assert_eq!(extract_host(&url), Some("vision.ics.uci.edu".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
