use crate::admission::Rejection;
use crate::config::Config;
use crate::dedup::{build_index, DedupIndex};
use crate::fingerprint::Fingerprint;
use crate::stats::{CorpusStats, Report};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Everything the engine accumulates across pages
///
/// One `CrawlState` exists per engine and is only ever touched under the
/// engine's lock, so a dedup lookup and the insert that follows it are never
/// interleaved with another page.
#[derive(Debug)]
pub struct CrawlState {
    stats: CorpusStats,
    dedup: Box<dyn DedupIndex>,
    started_at: DateTime<Utc>,
    total_fetched: u64,
    duplicate_pages: u64,
    skipped_pages: u64,
    rejections: BTreeMap<&'static str, u64>,
}

impl CrawlState {
    /// Creates empty state for a crawl starting now
    pub fn new(config: &Config) -> Self {
        Self {
            stats: CorpusStats::new(&config.stats, config.admission.domain_match),
            dedup: build_index(&config.dedup),
            started_at: Utc::now(),
            total_fetched: 0,
            duplicate_pages: 0,
            skipped_pages: 0,
            rejections: BTreeMap::new(),
        }
    }

    /// Counts a page that arrived with status 200 and a body
    pub fn record_fetched(&mut self) {
        self.total_fetched += 1;
    }

    /// Counts a fetched page that was dropped before fingerprinting
    pub fn record_skipped(&mut self) {
        self.skipped_pages += 1;
    }

    /// Looks the fingerprint up and stores it if no near-duplicate exists
    ///
    /// # Returns
    ///
    /// * `Some(existing)` - A stored fingerprint within the threshold; nothing was inserted
    /// * `None` - The fingerprint was new and has been inserted
    pub fn check_and_insert(&mut self, fp: Fingerprint) -> Option<Fingerprint> {
        if let Some(existing) = self.dedup.find_near_duplicate(&fp) {
            self.duplicate_pages += 1;
            return Some(existing);
        }

        self.dedup.insert(fp);
        None
    }

    /// Counts a link the admission filter turned away
    pub fn record_rejection(&mut self, rejection: &Rejection) {
        *self.rejections.entry(rejection.kind()).or_insert(0) += 1;
    }

    /// Registers an admitted link with the tokens of the page that linked to it
    pub fn register_admitted(&mut self, url: &str, tokens: &[String]) -> bool {
        self.stats.register_with_tokens(url, tokens)
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    pub fn dedup(&self) -> &dyn DedupIndex {
        self.dedup.as_ref()
    }

    pub fn total_fetched(&self) -> u64 {
        self.total_fetched
    }

    pub fn duplicate_pages(&self) -> u64 {
        self.duplicate_pages
    }

    pub fn skipped_pages(&self) -> u64 {
        self.skipped_pages
    }

    /// Builds a read-only report of the current state
    pub fn snapshot(&self, top_words: usize) -> Report {
        Report {
            started_at: self.started_at,
            generated_at: Utc::now(),
            total_fetched: self.total_fetched,
            unique_pages: self.stats.unique_count(),
            duplicate_pages: self.duplicate_pages,
            skipped_pages: self.skipped_pages,
            fingerprints_indexed: self.dedup.len(),
            longest_page: self.stats.longest_page().cloned(),
            top_words: self.stats.top_words(top_words),
            subdomains: self.stats.subdomains(),
            rejections: self
                .rejections
                .iter()
                .map(|(kind, count)| (kind.to_string(), *count))
                .collect(),
        }
    }
}
