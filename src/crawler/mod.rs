//! Crawler module for documentation page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] seam
//! - Title and content extraction
//! - Link discovery
//! - The breadth-first crawl loop

mod engine;
mod extractor;
mod fetcher;
mod frontier;
mod links;

pub use engine::{CrawlOutcome, CrawlResult, CrawlState, CrawlStats, Crawler, SkipReason};
pub use extractor::{ExtractedPage, PageExtractor, FALLBACK_TITLE};
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry, VisitedSet};
pub use links::discover_links;

use crate::config::Config;
use crate::progress::ProgressSink;
use crate::DossierError;
use url::Url;

/// Crawls a documentation site over HTTP
///
/// Builds an [`HttpFetcher`] from the crawler configuration and runs a
/// [`Crawler`] to completion.
///
/// # Arguments
///
/// * `config` - The full configuration
/// * `start_url` - Entry page of the site
/// * `progress` - Where step events go
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The run finished (completed or timed out)
/// * `Err(DossierError)` - The HTTP client or the crawler could not be built
pub async fn crawl<P: ProgressSink>(
    config: &Config,
    start_url: Url,
    progress: P,
) -> Result<CrawlOutcome, DossierError> {
    let fetcher = HttpFetcher::new(&config.crawler)?;
    let crawler = Crawler::new(config, start_url, fetcher, progress)?;
    Ok(crawler.run().await)
}
