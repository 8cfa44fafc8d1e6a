//! Output module for rendering crawl reports
//!
//! The engine only hands out a [`Report`](crate::Report); this module turns it
//! into the plain-text summary printed at the end of a run.

mod text;

pub use text::{format_report, print_report, ReportText};
