//! URL handling module for Sumi-Sieve
//!
//! This module provides link normalization, typed URL parsing, host extraction,
//! and allowed-domain matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::extract_host;
pub use matcher::host_matches;
pub use normalize::{normalize_link, parse_link};
