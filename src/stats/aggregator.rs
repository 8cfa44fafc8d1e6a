use crate::config::{DomainMatch, StatsConfig};
use crate::content::tokenize;
use crate::url::{extract_host, host_matches, normalize_link, parse_link};
use std::collections::{BTreeMap, HashMap, HashSet};

/// The page with the most filtered words seen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPage {
    pub url: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct WordCount {
    count: u64,
    // Insertion sequence number, used to break ties
    first_seen: u64,
}

/// Aggregates corpus-wide statistics over admitted URLs
///
/// Registration is idempotent per normalized URL: the first registration
/// records the URL and merges its page's words, later ones are ignored.
#[derive(Debug, Clone)]
pub struct CorpusStats {
    tracked_domain: String,
    domain_match: DomainMatch,
    unique_urls: HashSet<String>,
    words: HashMap<String, WordCount>,
    next_word_seq: u64,
    subdomains: BTreeMap<String, u64>,
    longest_page: Option<LongestPage>,
}

impl CorpusStats {
    /// Creates empty statistics
    ///
    /// Hosts matching `config.tracked_domain` under `domain_match` get
    /// per-subdomain page counts.
    pub fn new(config: &StatsConfig, domain_match: DomainMatch) -> Self {
        Self {
            tracked_domain: config.tracked_domain.clone(),
            domain_match,
            unique_urls: HashSet::new(),
            words: HashMap::new(),
            next_word_seq: 0,
            subdomains: BTreeMap::new(),
            longest_page: None,
        }
    }

    /// Registers an admitted URL together with the text of the page linking to it
    ///
    /// Returns true if the URL was new.
    pub fn register_admitted_url(&mut self, url: &str, page_text: &str) -> bool {
        let normalized = normalize_link(url, url);
        if self.unique_urls.contains(&normalized) {
            return false;
        }

        let tokens = tokenize(page_text);
        self.insert_new(normalized, &tokens);
        true
    }

    /// Same as [`register_admitted_url`](Self::register_admitted_url) with
    /// the page text already tokenized
    pub fn register_with_tokens(&mut self, url: &str, tokens: &[String]) -> bool {
        let normalized = normalize_link(url, url);
        if self.unique_urls.contains(&normalized) {
            return false;
        }

        self.insert_new(normalized, tokens);
        true
    }

    fn insert_new(&mut self, normalized: String, tokens: &[String]) {
        if let Some(host) = parse_link(&normalized).ok().and_then(|url| extract_host(&url)) {
            if host_matches(&self.tracked_domain, &host, self.domain_match) {
                *self.subdomains.entry(host).or_insert(0) += 1;
            }
        }

        for token in tokens {
            match self.words.get_mut(token) {
                Some(entry) => entry.count += 1,
                None => {
                    self.words.insert(
                        token.clone(),
                        WordCount {
                            count: 1,
                            first_seen: self.next_word_seq,
                        },
                    );
                    self.next_word_seq += 1;
                }
            }
        }

        let word_count = tokens.len();
        let is_longer = self
            .longest_page
            .as_ref()
            .map_or(word_count > 0, |longest| word_count > longest.word_count);
        if is_longer {
            self.longest_page = Some(LongestPage {
                url: normalized.clone(),
                word_count,
            });
        }

        self.unique_urls.insert(normalized);
    }

    /// Returns true if the URL has already been registered
    pub fn contains(&self, url: &str) -> bool {
        self.unique_urls.contains(&normalize_link(url, url))
    }

    pub fn unique_count(&self) -> usize {
        self.unique_urls.len()
    }

    pub fn longest_page(&self) -> Option<&LongestPage> {
        self.longest_page.as_ref()
    }

    /// Frequency of a single word
    pub fn word_count(&self, word: &str) -> u64 {
        self.words.get(word).map_or(0, |entry| entry.count)
    }

    /// The `limit` most frequent words, ties broken by first appearance
    pub fn top_words(&self, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(&String, &WordCount)> = self.words.iter().collect();
        entries.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });

        entries
            .into_iter()
            .take(limit)
            .map(|(word, entry)| (word.clone(), entry.count))
            .collect()
    }

    /// Page counts per tracked subdomain, sorted by host name
    pub fn subdomains(&self) -> Vec<(String, u64)> {
        self.subdomains
            .iter()
            .map(|(host, count)| (host.clone(), *count))
            .collect()
    }
}
