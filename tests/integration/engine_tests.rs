//! Integration tests for the engine
//!
//! These tests drive the public `Engine` API the way a fetch layer would,
//! one `(url, FetchResult)` pair at a time, and inspect the final report.

use std::sync::Arc;
use std::thread;
use sumi_sieve::config::{parse_config, Config, DomainMatch, IndexKind};
use sumi_sieve::engine::PageResult;
use sumi_sieve::state::PageOutcome;
use sumi_sieve::{normalize_link, AdmissionFilter, Engine, FetchResult, Fingerprint, FingerprintWidth};

/// Builds an HTML page with the given paragraph text and empty anchors
fn html_page(text: &str, hrefs: &[&str]) -> FetchResult {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\"></a>", href))
        .collect();
    FetchResult::ok(format!("<html><body><p>{}</p>{}</body></html>", text, anchors))
}

/// Space-separated distinct words `term{start}` .. `term{end - 1}`
fn terms(start: usize, end: usize) -> String {
    (start..end)
        .map(|i| format!("term{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_relative_and_fragment_links_normalized() {
    let engine = Engine::new(Config::default());
    let fetch = FetchResult::ok(r#"<a href="/x">x</a><a href="http://ics.uci.edu/y#frag">y</a>"#);

    let links = engine.process("http://ics.uci.edu/", &fetch);
    assert_eq!(
        links,
        vec![
            "http://ics.uci.edu/x".to_string(),
            "http://ics.uci.edu/y".to_string()
        ]
    );
}

#[test]
fn test_pdf_link_always_rejected() {
    let engine = Engine::new(Config::default());

    for page in 0..3 {
        let fetch = html_page(&terms(page * 100, page * 100 + 50), &["http://ics.uci.edu/file.pdf"]);
        let links = engine.process(&format!("http://ics.uci.edu/p{}", page), &fetch);
        assert!(links.is_empty());
    }

    let report = engine.snapshot();
    assert_eq!(report.rejections, vec![("file-type".to_string(), 3)]);
    assert_eq!(report.unique_pages, 0);
}

#[test]
fn test_seven_query_params_rejected() {
    let engine = Engine::new(Config::default());
    let fetch = html_page(
        "search results",
        &["/search?a=1&b=2&c=3&d=4&e=5&f=6&g=7", "/search?a=1&b=2"],
    );

    let links = engine.process("http://ics.uci.edu/", &fetch);
    assert_eq!(links, vec!["http://ics.uci.edu/search?a=1&b=2".to_string()]);
}

#[test]
fn test_near_duplicate_page_suppressed() {
    let engine = Engine::new(Config::default());
    let base_text = terms(0, 200);
    let edited_text = format!("{} inserted {}", terms(0, 100), terms(100, 200));

    let first = engine.process("http://ics.uci.edu/a", &html_page(&base_text, &["/from-a"]));
    assert_eq!(first, vec!["http://ics.uci.edu/from-a".to_string()]);

    let before = engine.snapshot();
    let second = engine.process_page(
        "http://ics.uci.edu/b",
        &html_page(&edited_text, &["/from-b", "/from-b-too"]),
    );
    assert_eq!(
        second,
        PageResult {
            outcome: PageOutcome::Duplicate,
            links: Vec::new(),
        }
    );

    let after = engine.snapshot();
    assert_eq!(after.unique_pages, before.unique_pages);
    assert_eq!(after.total_fetched, before.total_fetched + 1);
    assert_eq!(after.duplicate_pages, 1);
    assert_eq!(after.fingerprints_indexed, 1);

    // The two fingerprints really are within the threshold
    let base_tokens = sumi_sieve::content::tokenize(&base_text);
    let edited_tokens = sumi_sieve::content::tokenize(&edited_text);
    let a = Fingerprint::from_tokens(&base_tokens, FingerprintWidth::W64);
    let b = Fingerprint::from_tokens(&edited_tokens, FingerprintWidth::W64);
    assert!(a.hamming_distance(&b) <= Config::default().dedup.hamming_threshold);
}

#[test]
fn test_non_200_changes_nothing() {
    let engine = Engine::new(Config::default());
    engine.process("http://ics.uci.edu/", &html_page("welcome", &["/a"]));
    let before = engine.snapshot();

    for status in [301, 404, 500] {
        let mut fetch = html_page("error page", &["/b"]);
        fetch.status = status;
        assert!(engine.process("http://ics.uci.edu/err", &fetch).is_empty());
    }
    assert!(engine
        .process("http://ics.uci.edu/empty", &FetchResult::with_status(200))
        .is_empty());

    let after = engine.snapshot();
    assert_eq!(after.total_fetched, before.total_fetched);
    assert_eq!(after.unique_pages, before.unique_pages);
    assert_eq!(after.fingerprints_indexed, before.fingerprints_indexed);
    assert_eq!(after.top_words, before.top_words);
    assert_eq!(after.skipped_pages, 0);
}

#[test]
fn test_distinct_pages_all_processed() {
    let engine = Engine::new(Config::default());

    for page in 0..5 {
        let text = terms(page * 1000, page * 1000 + 80);
        let links = engine.process(
            &format!("http://ics.uci.edu/p{}", page),
            &html_page(&text, &[format!("/next{}", page).as_str()]),
        );
        assert_eq!(links.len(), 1, "page {} was treated as a duplicate", page);
    }

    let report = engine.snapshot();
    assert_eq!(report.total_fetched, 5);
    assert_eq!(report.unique_pages, 5);
    assert_eq!(report.duplicate_pages, 0);
    assert_eq!(report.fingerprints_indexed, 5);
}

#[test]
fn test_report_statistics() {
    let engine = Engine::new(Config::default());

    engine.process(
        "http://www.ics.uci.edu/",
        &html_page(
            "Research research faculty",
            &[
                "http://vision.ics.uci.edu/",
                "http://www.ics.uci.edu/about",
                "http://www.stat.uci.edu/",
            ],
        ),
    );
    engine.process(
        "http://www.ics.uci.edu/long",
        &html_page(
            "Students faculty graduate programs admissions deadlines",
            &["http://vision.ics.uci.edu/", "http://vision.ics.uci.edu/people"],
        ),
    );

    let report = engine.snapshot();
    assert_eq!(report.unique_pages, 4);
    assert_eq!(
        report.subdomains,
        vec![
            ("vision.ics.uci.edu".to_string(), 2),
            ("www.ics.uci.edu".to_string(), 1),
        ]
    );

    let longest = report.longest_page.expect("a page had words");
    assert_eq!(longest.url, "http://vision.ics.uci.edu/people");
    assert_eq!(longest.word_count, 6);

    // Each of the three first-page links merged "research" twice
    assert_eq!(report.top_words[0], ("research".to_string(), 6));
    assert_eq!(report.top_words[1], ("faculty".to_string(), 4));
}

#[test]
fn test_oversized_declared_length_skipped() {
    let engine = Engine::new(parse_config("[engine]\nmax-body-bytes = 1000\n").unwrap());

    let fetch = html_page("small body", &["/a"]).with_header("Content-Length", "1000000");
    let result = engine.process_page("http://ics.uci.edu/", &fetch);
    assert_eq!(result.outcome, PageOutcome::Oversized);

    let report = engine.snapshot();
    assert_eq!(report.total_fetched, 1);
    assert_eq!(report.skipped_pages, 1);
    assert_eq!(report.unique_pages, 0);
}

#[test]
fn test_unreadable_body_skipped() {
    let engine = Engine::new(Config::default());
    let result = engine.process_page("http://ics.uci.edu/", &FetchResult::ok(vec![0xc3, 0x28]));
    assert_eq!(result.outcome, PageOutcome::Unreadable);
    assert_eq!(engine.snapshot().skipped_pages, 1);
}

#[test]
fn test_suffix_matching_rejects_lookalike_hosts() {
    let toml = "[admission]\ndomain-match = \"suffix\"\n";
    let config = parse_config(toml).unwrap();
    assert_eq!(config.admission.domain_match, DomainMatch::Suffix);

    let lookalike = "http://evilics.uci.edu.attacker.com/";
    assert!(!AdmissionFilter::new(config.admission.clone()).admit(lookalike));
    assert!(AdmissionFilter::default().admit(lookalike));
}

#[test]
fn test_linear_and_banded_engines_agree() {
    let pages: Vec<(String, String)> = (0..12)
        .map(|i| {
            // Every third page repeats an earlier page's text
            let seed = if i % 3 == 2 { i - 1 } else { i };
            (format!("http://ics.uci.edu/p{}", i), terms(seed * 500, seed * 500 + 60))
        })
        .collect();

    let mut linear_config = Config::default();
    linear_config.dedup.index = IndexKind::Linear;
    let linear = Engine::new(linear_config);
    let banded = Engine::new(Config::default());

    for (url, text) in &pages {
        let fetch = html_page(text, &["/next"]);
        assert_eq!(
            linear.process_page(url, &fetch).outcome,
            banded.process_page(url, &fetch).outcome,
            "{}",
            url
        );
    }
    assert_eq!(banded.snapshot().duplicate_pages, 4);
}

#[test]
fn test_concurrent_processing_is_consistent() {
    let engine = Arc::new(Engine::new(Config::default()));
    let text = terms(0, 120);

    // Eight workers deliver the same content at once; only one can be unique
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let text = text.clone();
            thread::spawn(move || {
                let url = format!("http://ics.uci.edu/copy{}", i);
                engine.process_page(&url, &html_page(&text, &["/common"])).outcome
            })
        })
        .collect();

    let outcomes: Vec<PageOutcome> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let processed = outcomes.iter().filter(|o| o.is_processed()).count();
    assert_eq!(processed, 1);

    let report = engine.snapshot();
    assert_eq!(report.total_fetched, 8);
    assert_eq!(report.duplicate_pages, 7);
    assert_eq!(report.unique_pages, 1);
}

#[test]
fn test_normalization_idempotent() {
    let base = "http://ics.uci.edu/dir/page.html";
    for href in ["../up#a", "same", "//cs.uci.edu/x?y=1#z", "https://ics.uci.edu/"] {
        let once = normalize_link(href, base);
        assert_eq!(normalize_link(&once, &once), once);
    }
    assert_eq!(
        normalize_link("/a#one", base),
        normalize_link("/a#two", base)
    );
}
