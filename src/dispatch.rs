//! Running adapters end-to-end and aggregating their results.
//!
//! # Failure isolation
//!
//! - A listing page that cannot be fetched fails [`ScrapeDispatcher::scrape_one`].
//! - An article page that cannot be fetched is logged and dropped; the rest
//!   of the source's articles are still returned.
//! - In [`ScrapeDispatcher::scrape_all`] a failing source becomes an error
//!   entry in the report and never affects other sources.
//!
//! # Ordering
//!
//! Article pages are fetched concurrently (up to `max_concurrent_fetches` per
//! source) and may finish in any order. Each link owns a result slot indexed
//! by its position in the listing, so the compacted output keeps listing
//! order with failed slots removed.

use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::models::{ArticleRecord, ScrapeReport, SourceOutcome};
use crate::registry::SourceRegistry;
use crate::scrapers::SourceAdapter;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Default bound on concurrent article fetches per source.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Orchestrates adapters over a shared [`PageFetcher`].
pub struct ScrapeDispatcher {
    registry: Arc<SourceRegistry>,
    fetcher: Arc<dyn PageFetcher>,
    article_limit: Option<usize>,
    max_concurrent_fetches: usize,
}

impl ScrapeDispatcher {
    pub fn new(registry: Arc<SourceRegistry>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            registry,
            fetcher,
            article_limit: None,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Only parse the first `limit` listed links of each source.
    pub fn with_article_limit(mut self, limit: Option<usize>) -> Self {
        self.article_limit = limit;
        self
    }

    /// Bound concurrent article fetches per source (at least 1).
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max.max(1);
        self
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// List one source's articles and parse each of them.
    ///
    /// # Returns
    ///
    /// Successfully parsed records, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] only when the listing page cannot be fetched.
    #[instrument(level = "info", skip_all, fields(source = %adapter.source()))]
    pub async fn scrape_one(
        &self,
        adapter: &dyn SourceAdapter,
    ) -> Result<Vec<ArticleRecord>, FetchError> {
        let mut links = adapter.get_article_links(self.fetcher.as_ref()).await?;
        if let Some(limit) = self.article_limit {
            links.truncate(limit);
        }

        let mut slots: Vec<Option<ArticleRecord>> = vec![None; links.len()];
        let fetcher = self.fetcher.as_ref();
        let mut parsed = stream::iter(links.iter().cloned().enumerate())
            .map(|(index, url)| async move {
                let result = adapter.parse_article(fetcher, &url).await;
                (index, url, result)
            })
            .buffer_unordered(self.max_concurrent_fetches);

        while let Some((index, url, result)) = parsed.next().await {
            match result {
                Ok(record) => slots[index] = Some(record),
                Err(e) => warn!(%url, error = %e, "Article fetch failed; skipping"),
            }
        }

        let articles: Vec<ArticleRecord> = slots.into_iter().flatten().collect();
        info!(
            listed = links.len(),
            parsed = articles.len(),
            failed = links.len() - articles.len(),
            "Scraped source"
        );
        Ok(articles)
    }

    /// Scrape every registered source concurrently.
    ///
    /// The report holds exactly one entry per registered source, whether
    /// it succeeded or not.
    #[instrument(level = "info", skip_all)]
    pub async fn scrape_all(&self) -> ScrapeReport {
        let runs = self.registry.adapters().map(|adapter| async move {
            let id = adapter.source().id();
            let outcome = match self.scrape_one(adapter.as_ref()).await {
                Ok(articles) => SourceOutcome::Articles(articles),
                Err(e) => {
                    error!(source = id, error = %e, "Source failed");
                    SourceOutcome::failed(e)
                }
            };
            (id.to_string(), outcome)
        });

        let report: ScrapeReport = join_all(runs).await.into_iter().collect();
        info!(
            sources = report.len(),
            failed = report.values().filter(|o| o.is_failed()).count(),
            "Scrape-all complete"
        );
        report
    }
}
