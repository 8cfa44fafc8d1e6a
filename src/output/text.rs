//! Plain-text rendering of a crawl report

use crate::stats::Report;
use std::fmt;

/// Plain-text view of a report, rendered through `Display`
#[derive(Debug, Clone, Copy)]
pub struct ReportText<'a> {
    pub report: &'a Report,

    /// Parent domain named in the subdomain section heading
    pub tracked_domain: &'a str,
}

/// Renders a report as plain text
///
/// # Arguments
///
/// * `report` - The snapshot to render
/// * `tracked_domain` - Parent domain named in the subdomain section heading
pub fn format_report(report: &Report, tracked_domain: &str) -> String {
    ReportText {
        report,
        tracked_domain,
    }
    .to_string()
}

/// Prints a report to stdout
pub fn print_report(report: &Report, tracked_domain: &str) {
    print!(
        "{}",
        ReportText {
            report,
            tracked_domain,
        }
    );
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let tracked_domain = self.tracked_domain;

        writeln!(out, "=== Crawl Report ===")?;
        writeln!(out)?;

        let elapsed = report.generated_at - report.started_at;
        writeln!(out, "Overview:")?;
        writeln!(out, "  Started: {}", report.started_at.to_rfc3339())?;
        writeln!(out, "  Generated: {}", report.generated_at.to_rfc3339())?;
        writeln!(out, "  Elapsed: {}s", elapsed.num_seconds())?;
        writeln!(out, "  Pages fetched: {}", report.total_fetched)?;
        writeln!(out, "  Unique pages: {}", report.unique_pages)?;
        writeln!(out, "  Near-duplicate pages: {}", report.duplicate_pages)?;
        writeln!(out, "  Skipped pages: {}", report.skipped_pages)?;
        writeln!(out, "  Fingerprints indexed: {}", report.fingerprints_indexed)?;
        writeln!(out)?;

        writeln!(out, "Longest page:")?;
        match &report.longest_page {
            Some(page) => writeln!(out, "  URL: {}, Word Count: {}", page.url, page.word_count)?,
            None => writeln!(out, "  (none)")?,
        }
        writeln!(out)?;

        writeln!(out, "Top {} most common words:", report.top_words.len())?;
        for (word, count) in &report.top_words {
            writeln!(out, "  {} -> {}", word, count)?;
        }
        writeln!(out)?;

        writeln!(out, "Subdomains within {}:", tracked_domain)?;
        for (host, count) in &report.subdomains {
            writeln!(out, "  {}, {}", host, count)?;
        }

        if !report.rejections.is_empty() {
            writeln!(out)?;
            writeln!(out, "Rejected links ({}):", report.total_rejections())?;
            for (kind, count) in &report.rejections {
                writeln!(out, "  {}: {}", kind, count)?;
            }
        }

        Ok(())
    }
}
