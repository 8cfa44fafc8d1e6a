//! Page content handling
//!
//! This module turns fetched HTML into the two things the engine needs:
//! anchor hrefs for link extraction, and filtered word tokens for
//! fingerprinting and corpus statistics.

mod html;
mod stopwords;
mod tokenizer;

pub use html::{parse_html, ParsedPage};
pub use stopwords::is_stop_word;
pub use tokenizer::tokenize;
