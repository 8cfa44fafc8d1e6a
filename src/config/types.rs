use crate::fingerprint::FingerprintWidth;
use serde::Deserialize;

/// Main configuration structure for Sumi-Sieve
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub admission: AdmissionConfig,
    pub dedup: DedupConfig,
    pub stats: StatsConfig,
}

/// Per-page processing limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pages whose declared or actual body exceeds this size are skipped
    #[serde(rename = "max-body-bytes")]
    pub max_body_bytes: usize,

    /// Number of pages the replay driver analyzes concurrently
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024,
            max_concurrent_pages: 8,
        }
    }
}

/// How a host is compared against an allowed parent domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainMatch {
    /// The host contains the domain anywhere
    #[default]
    Substring,
    /// The host is the domain or one of its subdomains
    Suffix,
}

/// Admission filter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Parent domains a link's host must match
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Matching policy for `allowed_domains` and the tracked stats domain
    #[serde(rename = "domain-match")]
    pub domain_match: DomainMatch,

    /// Maximum number of `&`-separated query parameters
    #[serde(rename = "max-query-params")]
    pub max_query_params: usize,

    /// Maximum number of non-empty path segments
    #[serde(rename = "max-path-segments")]
    pub max_path_segments: usize,

    /// Maximum number of `/` characters in the path
    #[serde(rename = "max-path-slashes")]
    pub max_path_slashes: usize,

    /// Maximum number of `=` characters in the path
    #[serde(rename = "max-path-equals")]
    pub max_path_equals: usize,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            allowed_domains: vec![
                "ics.uci.edu".to_string(),
                "cs.uci.edu".to_string(),
                "informatics.uci.edu".to_string(),
                "stat.uci.edu".to_string(),
            ],
            domain_match: DomainMatch::Substring,
            max_query_params: 5,
            max_path_segments: 5,
            max_path_slashes: 8,
            max_path_equals: 3,
        }
    }
}

/// Which near-duplicate index implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Flat scan over every stored fingerprint
    Linear,
    /// Band-keyed lookup with exact verification
    #[default]
    Banded,
}

/// Content deduplication configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Fingerprint width in bits (16, 32 or 64)
    #[serde(rename = "fingerprint-bits")]
    pub fingerprint_bits: FingerprintWidth,

    /// Maximum Hamming distance at which two pages are near-duplicates
    #[serde(rename = "hamming-threshold")]
    pub hamming_threshold: u32,

    /// Index implementation
    pub index: IndexKind,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            fingerprint_bits: FingerprintWidth::W64,
            hamming_threshold: 8,
            index: IndexKind::Banded,
        }
    }
}

/// Corpus statistics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Parent domain whose hosts get per-subdomain page counts
    #[serde(rename = "tracked-domain")]
    pub tracked_domain: String,

    /// Number of most frequent words in the report
    #[serde(rename = "top-words")]
    pub top_words: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            tracked_domain: "ics.uci.edu".to_string(),
            top_words: 50,
        }
    }
}
