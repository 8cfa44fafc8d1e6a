//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: everything the engine accumulates over a run (dedup index,
//!   corpus statistics, page and rejection counters)
//! - `PageOutcome`: what happened to a single fetched page

mod crawl_state;
mod page_outcome;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_outcome::PageOutcome;
