//! Replays recorded fetch results through an engine
//!
//! A manifest lists pages the way a fetch layer would have delivered them.
//! The driver feeds them to a shared [`Engine`] from a bounded pool of
//! workers, which exercises the engine the same way a concurrent crawler
//! would.

mod manifest;

pub use manifest::{load_manifest, parse_manifest, Manifest, ManifestError, ManifestPage};

use crate::engine::{Engine, PageResult};
use crate::state::PageOutcome;
use crate::SieveError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// What happened to one manifest page
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Position in the manifest
    pub index: usize,
    pub url: String,
    pub outcome: PageOutcome,
    pub links: Vec<String>,
}

/// Feeds every manifest page through the engine
///
/// At most `max-concurrent-pages` pages are in flight at once. Parsing and
/// fingerprinting run on the blocking pool. Records come back in manifest
/// order regardless of completion order.
pub async fn replay(engine: Arc<Engine>, manifest: Manifest) -> Result<Vec<PageRecord>, SieveError> {
    let max_concurrent = engine.config().engine.max_concurrent_pages.max(1) as usize;
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let base_dir = Arc::new(manifest.base_dir);

    tracing::info!(
        "Replaying {} pages (max_concurrent_pages={})",
        manifest.pages.len(),
        max_concurrent
    );

    let mut tasks = JoinSet::new();
    for (index, page) in manifest.pages.into_iter().enumerate() {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let engine = Arc::clone(&engine);
        let base_dir = Arc::clone(&base_dir);

        tasks.spawn(async move {
            let _permit = permit;
            let fetch = page.load(&base_dir).await?;

            let url = page.url;
            let result = tokio::task::spawn_blocking(move || {
                let result = engine.process_page(&url, &fetch);
                (url, result)
            })
            .await?;

            Ok::<_, SieveError>((index, result))
        });
    }

    let mut records = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, (url, PageResult { outcome, links })) = joined??;
        if outcome.is_processed() {
            tracing::debug!("{} -> {} links admitted", url, links.len());
        } else {
            tracing::debug!("{} -> {}", url, outcome);
        }
        records.push(PageRecord {
            index,
            url,
            outcome,
            links,
        });
    }

    records.sort_by_key(|record| record.index);
    Ok(records)
}
