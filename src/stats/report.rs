use super::LongestPage;
use chrono::{DateTime, Utc};

/// Read-only snapshot of a crawl's statistics
///
/// Produced by [`Engine::snapshot`](crate::Engine::snapshot) and handed to a
/// report formatter at shutdown.
#[derive(Debug, Clone)]
pub struct Report {
    /// When the engine was created
    pub started_at: DateTime<Utc>,

    /// When this snapshot was taken
    pub generated_at: DateTime<Utc>,

    /// Pages received with status 200 and a body
    pub total_fetched: u64,

    /// Distinct admitted URLs
    pub unique_pages: usize,

    /// Pages suppressed as near-duplicates
    pub duplicate_pages: u64,

    /// Pages skipped as oversized or unreadable
    pub skipped_pages: u64,

    /// Fingerprints held by the dedup index
    pub fingerprints_indexed: usize,

    /// Page with the most filtered words, if any had words
    pub longest_page: Option<LongestPage>,

    /// Most frequent words, highest count first, ties by first appearance
    pub top_words: Vec<(String, u64)>,

    /// Per-subdomain counts for the tracked domain, sorted by host name
    pub subdomains: Vec<(String, u64)>,

    /// Rejected link counts keyed by rejection kind, sorted by kind
    pub rejections: Vec<(String, u64)>,
}

impl Report {
    /// Total links rejected by the admission filter
    pub fn total_rejections(&self) -> u64 {
        self.rejections.iter().map(|(_, count)| count).sum()
    }
}
