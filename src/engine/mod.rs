//! Per-page processing engine
//!
//! The [`Engine`] is the crate's entry point. For every fetched page it:
//!
//! 1. Gates the fetch result on status, size and encoding
//! 2. Tokenizes and fingerprints the visible text
//! 3. Checks the fingerprint against the dedup index
//! 4. For unique pages, filters every outgoing link and registers the
//!    admitted ones with the corpus statistics
//!
//! Steps 1 and 2, plus link normalization and filtering, touch no shared
//! state and run on the caller's thread. Only the dedup check and the
//! statistics updates take the engine's lock, so pages handed over from
//! several workers serialize at that point alone.

mod analysis;
mod fetch;

pub use analysis::{analyze, PageAnalysis};
pub use fetch::{gate, FetchResult, PageSkip};

use crate::admission::{log_rejection, AdmissionFilter};
use crate::config::Config;
use crate::state::{CrawlState, PageOutcome};
use crate::stats::Report;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What processing a page produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub outcome: PageOutcome,

    /// Admitted, normalized outgoing links; empty unless the page was processed
    pub links: Vec<String>,
}

impl PageResult {
    fn without_links(outcome: PageOutcome) -> Self {
        Self {
            outcome,
            links: Vec::new(),
        }
    }
}

/// Crawl-admission and deduplication engine
///
/// Safe to share between threads; see the module docs for what runs under
/// the lock.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    filter: AdmissionFilter,
    state: Mutex<CrawlState>,
}

impl Engine {
    /// Creates an engine with empty crawl state
    pub fn new(config: Config) -> Self {
        let filter = AdmissionFilter::new(config.admission.clone());
        let state = Mutex::new(CrawlState::new(&config));

        tracing::debug!(
            "Engine ready: {} fingerprints, threshold {}, {:?} index",
            config.dedup.fingerprint_bits,
            config.dedup.hamming_threshold,
            config.dedup.index
        );

        Self {
            config,
            filter,
            state,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filter(&self) -> &AdmissionFilter {
        &self.filter
    }

    /// Processes a fetched page and returns its admitted outgoing links
    pub fn process(&self, url: &str, fetch: &FetchResult) -> Vec<String> {
        self.process_page(url, fetch).links
    }

    /// Processes a fetched page and reports what happened to it
    pub fn process_page(&self, url: &str, fetch: &FetchResult) -> PageResult {
        let html = match gate(fetch, self.config.engine.max_body_bytes) {
            Ok(html) => html,
            Err(skip) => return self.skip(url, skip),
        };

        let analysis = analyze(url, html, &self.filter, self.config.dedup.fingerprint_bits);

        let mut state = self.lock_state();
        state.record_fetched();

        if let Some(fp) = analysis.fingerprint {
            if let Some(existing) = state.check_and_insert(fp) {
                tracing::debug!(
                    "Suppressed {}: fingerprint {} is {} bits from {}",
                    url,
                    fp,
                    fp.hamming_distance(&existing),
                    existing
                );
                return PageResult::without_links(PageOutcome::Duplicate);
            }
        }

        let mut links = Vec::new();
        for (link, decision) in analysis.links {
            match decision {
                Ok(()) => {
                    state.register_admitted(&link, &analysis.tokens);
                    links.push(link);
                }
                Err(rejection) => {
                    log_rejection(&link, &rejection);
                    state.record_rejection(&rejection);
                }
            }
        }

        tracing::debug!("Processed {}: {} links admitted", url, links.len());

        PageResult {
            outcome: PageOutcome::Processed,
            links,
        }
    }

    /// Returns a read-only snapshot of the crawl statistics
    pub fn snapshot(&self) -> Report {
        self.lock_state().snapshot(self.config.stats.top_words)
    }

    fn skip(&self, url: &str, skip: PageSkip) -> PageResult {
        if !skip.counts_as_fetched() {
            tracing::debug!("Ignoring {}: {}", url, skip);
            return PageResult::without_links(skip.outcome());
        }

        tracing::warn!("Skipping {}: {}", url, skip);

        let mut state = self.lock_state();
        state.record_fetched();
        state.record_skipped();

        PageResult::without_links(skip.outcome())
    }

    // A panic while holding the lock leaves counters that are still usable
    fn lock_state(&self) -> MutexGuard<'_, CrawlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
