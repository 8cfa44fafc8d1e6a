//! Integration tests for manifest replay
//!
//! These tests write a manifest and its page bodies to a temporary
//! directory and replay them through a shared engine on the tokio runtime.

use std::fs;
use std::sync::Arc;
use sumi_sieve::config::parse_config;
use sumi_sieve::output::format_report;
use sumi_sieve::replay::{load_manifest, replay};
use sumi_sieve::state::PageOutcome;
use sumi_sieve::{Config, Engine, SieveError};
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[page]]
url = "https://www.ics.uci.edu/"
body-path = "pages/index.html"

[page.headers]
Content-Type = "text/html"

[[page]]
url = "https://www.ics.uci.edu/copy"
body-path = "pages/index.html"

[[page]]
url = "https://www.ics.uci.edu/gone"
status = 404

[[page]]
url = "https://www.ics.uci.edu/faculty"
body-path = "pages/faculty.html"
"#;

fn write_crawl(dir: &TempDir) -> std::path::PathBuf {
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(
        dir.path().join("pages/index.html"),
        r#"<html><body>
            <p>Donald Bren School of Information and Computer Sciences</p>
            <a href="/about">About</a>
            <a href="/files/brochure.pdf">Brochure</a>
            <a href="https://example.com/">Elsewhere</a>
        </body></html>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("pages/faculty.html"),
        r#"<html><body>
            <p>Faculty directory listing professors lecturers researchers emeriti</p>
            <a href="https://vision.ics.uci.edu/people">Vision lab</a>
        </body></html>"#,
    )
    .unwrap();

    let manifest = dir.path().join("crawl.toml");
    fs::write(&manifest, MANIFEST).unwrap();
    manifest
}

#[tokio::test]
async fn test_replay_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = load_manifest(&write_crawl(&dir)).unwrap();

    let engine = Arc::new(Engine::new(Config::default()));
    let records = replay(Arc::clone(&engine), manifest).await.unwrap();

    let outcomes: Vec<PageOutcome> = records.iter().map(|r| r.outcome).collect();
    assert_eq!(records.len(), 4);
    assert_eq!(outcomes[2], PageOutcome::Unprocessable);
    assert_eq!(outcomes[3], PageOutcome::Processed);

    // The index page and its copy race; exactly one wins
    let index_outcomes = [outcomes[0], outcomes[1]];
    assert!(index_outcomes.contains(&PageOutcome::Processed));
    assert!(index_outcomes.contains(&PageOutcome::Duplicate));

    let report = engine.snapshot();
    assert_eq!(report.total_fetched, 3);
    assert_eq!(report.duplicate_pages, 1);
    assert_eq!(report.unique_pages, 2);
    assert_eq!(report.total_rejections(), 2);
    assert_eq!(
        report.subdomains,
        vec![
            ("vision.ics.uci.edu".to_string(), 1),
            ("www.ics.uci.edu".to_string(), 1),
        ]
    );

    let text = format_report(&report, "ics.uci.edu");
    assert!(text.contains("Unique pages: 2"));
}

#[tokio::test]
async fn test_replay_single_worker_is_ordered() {
    let dir = TempDir::new().unwrap();
    let manifest = load_manifest(&write_crawl(&dir)).unwrap();

    let config = parse_config("[engine]\nmax-concurrent-pages = 1\n").unwrap();
    let engine = Arc::new(Engine::new(config));
    let records = replay(engine, manifest).await.unwrap();

    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.ics.uci.edu/",
            "https://www.ics.uci.edu/copy",
            "https://www.ics.uci.edu/gone",
            "https://www.ics.uci.edu/faculty",
        ]
    );
    assert_eq!(records[0].outcome, PageOutcome::Processed);
    assert_eq!(records[0].links, vec!["https://www.ics.uci.edu/about".to_string()]);
    assert_eq!(records[1].outcome, PageOutcome::Duplicate);
}

#[tokio::test]
async fn test_missing_body_file_fails_replay() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crawl.toml");
    fs::write(
        &path,
        "[[page]]\nurl = \"https://ics.uci.edu/\"\nbody-path = \"absent.html\"\n",
    )
    .unwrap();

    let manifest = load_manifest(&path).unwrap();
    let engine = Arc::new(Engine::new(Config::default()));
    let result = replay(engine, manifest).await;
    assert!(matches!(result, Err(SieveError::Manifest(_))));
}
