//! Corpus statistics
//!
//! This module tracks the unique admitted URLs, the global word frequency
//! table, per-subdomain page counts and the longest page, and packages them
//! into a [`Report`] at the end of a crawl.

mod aggregator;
mod report;

pub use aggregator::{CorpusStats, LongestPage};
pub use report::Report;
