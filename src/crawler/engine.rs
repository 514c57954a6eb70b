//! Crawl engine - breadth-first traversal of one documentation site
//!
//! This module contains the crawl loop that coordinates:
//! - Managing the frontier queue and visited set
//! - Enforcing the depth limit and run deadline
//! - Fetching, extracting, and discovering links page by page
//! - Reporting progress
//!
//! One run issues fetches strictly one at a time with a politeness delay in
//! between. Independent runs share no state and may execute concurrently.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::extractor::{ExtractedPage, PageExtractor};
use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry, VisitedSet};
use crate::crawler::links::discover_links;
use crate::progress::{step, truncate_chars, ProgressEvent, ProgressSink};
use crate::url::{SiteOrigin, UrlClassifier};
use crate::DossierError;
use scraper::Html;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Created, not yet started
    Idle,
    /// Processing the frontier
    Running,
    /// Frontier exhausted
    Completed,
    /// Run deadline passed; remaining frontier discarded
    TimedOut,
}

impl CrawlState {
    /// Returns true for `Completed` and `TimedOut`
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::TimedOut)
    }
}

/// Why a frontier entry produced no page
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no content extracted")]
    EmptyContent,
}

/// Pages extracted by one run, in extraction order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    pages: Vec<ExtractedPage>,
}

impl CrawlResult {
    pub fn new(pages: Vec<ExtractedPage>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[ExtractedPage] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<ExtractedPage> {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedPage> {
        self.pages.iter()
    }
}

impl IntoIterator for CrawlResult {
    type Item = ExtractedPage;
    type IntoIter = std::vec::IntoIter<ExtractedPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a CrawlResult {
    type Item = &'a ExtractedPage;
    type IntoIter = std::slice::Iter<'a, ExtractedPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Counters describing a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages appended to the result
    pub pages_extracted: usize,

    /// Visited URLs that failed to fetch or had no content
    pub pages_skipped: usize,

    /// Frontier entries ever pushed, the start URL included
    pub urls_enqueued: usize,

    /// Distinct canonical URLs visited
    pub urls_visited: usize,

    /// Entries dropped from the frontier when the deadline passed
    pub urls_discarded: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Everything a finished run hands back to its caller
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// `Completed` or `TimedOut`
    pub state: CrawlState,
    pub result: CrawlResult,
    pub stats: CrawlStats,
}

/// Crawls one documentation site
///
/// The crawler is consumed by [`Crawler::run`]; its frontier and visited set
/// live only for that call.
pub struct Crawler<F, P> {
    settings: CrawlerConfig,
    classifier: UrlClassifier,
    extractor: PageExtractor,
    fetcher: F,
    progress: P,
    start_url: Url,
    state: CrawlState,
}

impl<F: Fetcher, P: ProgressSink> Crawler<F, P> {
    /// Creates a crawler for the site serving `start_url`
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler limits, link filter, and extraction selectors
    /// * `start_url` - The entry page; crawled at depth 0 without classification
    /// * `fetcher` - Fetch collaborator
    /// * `progress` - Progress collaborator
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(DossierError)` - The start URL has no host or a selector is invalid
    pub fn new(config: &Config, start_url: Url, fetcher: F, progress: P) -> Result<Self, DossierError> {
        let origin = SiteOrigin::from_url(&start_url)?;
        let extractor = PageExtractor::new(&config.extraction)?;

        Ok(Self {
            settings: config.crawler.clone(),
            classifier: UrlClassifier::new(origin, config.filter.clone()),
            extractor,
            fetcher,
            progress,
            start_url,
            state: CrawlState::Idle,
        })
    }

    /// Current lifecycle state (`Idle` until [`Crawler::run`] is called)
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the crawl loop to completion or until the deadline passes
    ///
    /// Each iteration:
    /// 1. Checks the deadline
    /// 2. Pops the frontier head; skips it if visited or deeper than the limit
    /// 3. Reports progress
    /// 4. Fetches and extracts the page; failures are logged and skipped
    /// 5. Appends the extracted page to the result
    /// 6. Below the depth limit, queues accepted unvisited links at depth + 1
    /// 7. Marks the URL visited (failed ones too, so they are never retried)
    /// 8. Sleeps for the politeness delay
    pub async fn run(mut self) -> CrawlOutcome {
        let started = Instant::now();
        // A deadline too far out to represent never fires
        let deadline = started.checked_add(self.settings.run_timeout());
        let max_depth = self.settings.max_depth;
        let delay = self.settings.request_delay();

        let mut frontier = Frontier::seeded(self.start_url.clone());
        let mut visited = VisitedSet::default();
        let mut pages: Vec<ExtractedPage> = Vec::new();
        let mut stats = CrawlStats::default();
        let mut processed = 0usize;

        self.state = CrawlState::Running;
        tracing::info!(
            "Starting crawl of {} (max depth {}, timeout {:?})",
            self.start_url,
            max_depth,
            self.settings.run_timeout()
        );

        let final_state = loop {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                stats.urls_discarded = frontier.discard();
                tracing::info!(
                    "Timeout reached after {:?}. Extracted {} pages, discarded {} queued URLs",
                    started.elapsed(),
                    pages.len(),
                    stats.urls_discarded
                );
                break CrawlState::TimedOut;
            }

            let Some(entry) = frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break CrawlState::Completed;
            };

            if visited.contains(&entry.url) || entry.depth > max_depth {
                continue;
            }

            self.progress.report(ProgressEvent::new(
                step::EXTRACT,
                format!("Extracting documentation ({} pages found)", pages.len()),
                format!("Processing: {}", truncate_chars(entry.url.as_str(), 80)),
            ));
            tracing::debug!("Processing URL: {} (depth {})", entry.url, entry.depth);

            match self.process_entry(&entry).await {
                Ok((page, links)) => {
                    pages.push(page);
                    for link in links {
                        if self.classifier.accepts(&link) && !visited.contains(&link) {
                            frontier.push(link, entry.depth + 1);
                        }
                    }
                }
                Err(reason) => {
                    tracing::warn!("Skipping {}: {}", entry.url, reason);
                    stats.pages_skipped += 1;
                }
            }

            visited.insert(&entry.url);
            processed += 1;

            if processed % 10 == 0 {
                let rate = processed as f64 / started.elapsed().as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} pages processed, {} extracted, {} in frontier, {:.2} pages/sec",
                    processed,
                    pages.len(),
                    frontier.len(),
                    rate
                );
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        };

        self.state = final_state;
        stats.pages_extracted = pages.len();
        stats.urls_enqueued = frontier.total_enqueued();
        stats.urls_visited = visited.len();
        stats.elapsed = started.elapsed();

        tracing::info!(
            "Crawl finished ({:?}): {} pages extracted, {} skipped in {:?}",
            final_state,
            stats.pages_extracted,
            stats.pages_skipped,
            stats.elapsed
        );

        CrawlOutcome {
            state: final_state,
            result: CrawlResult::new(pages),
            stats,
        }
    }

    /// Fetches one frontier entry and turns it into a page plus its outbound links
    async fn process_entry(
        &self,
        entry: &FrontierEntry,
    ) -> Result<(ExtractedPage, Vec<Url>), SkipReason> {
        let fetched = self.fetcher.fetch(&entry.url).await?;
        let follow_links = entry.depth < self.settings.max_depth;

        self.extract_and_discover(&entry.url, &fetched, follow_links)
            .ok_or(SkipReason::EmptyContent)
    }

    /// Parses the page body and runs extraction and link discovery on it
    ///
    /// The parsed tree lives only inside this call.
    fn extract_and_discover(
        &self,
        requested: &Url,
        fetched: &FetchedPage,
        follow_links: bool,
    ) -> Option<(ExtractedPage, Vec<Url>)> {
        let document = Html::parse_document(&fetched.body);
        let page = self.extractor.extract(&document, requested)?;

        let links = if follow_links {
            discover_links(&document, &fetched.url)
        } else {
            Vec::new()
        };

        Some((page, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ChannelProgress, NoProgress};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc::unbounded_channel;

    const SITE: &str = "https://docs.example.com";

    /// In-memory site: path -> HTML body; unknown paths answer 404
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeSite {
        fn page(mut self, path: &str, body: &str) -> Self {
            self.pages.insert(format!("{}{}", SITE, path), body.to_string());
            self
        }

        fn shared(self) -> Arc<Self> {
            Arc::new(self)
        }

        fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for FakeSite {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url.as_str()) {
                Some(body) => Ok(FetchedPage {
                    url: url.clone(),
                    status: 200,
                    body: body.clone(),
                }),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn doc(title: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        format!(
            "<html><head><title>{title}</title></head><body><nav>{anchors}</nav><main><h1>{title}</h1><p>Content of {title}.</p></main>{anchors}</body></html>"
        )
    }

    fn config(max_depth: u32) -> Config {
        let mut config = Config::default();
        config.crawler.max_depth = max_depth;
        config.crawler.request_delay_ms = 0;
        config
    }

    async fn crawl(site: &Arc<FakeSite>, config: &Config, start_path: &str) -> CrawlOutcome {
        let start = Url::parse(&format!("{}{}", SITE, start_path)).unwrap();
        Crawler::new(config, start, Arc::clone(site), NoProgress)
            .unwrap()
            .run()
            .await
    }

    fn titles(outcome: &CrawlOutcome) -> Vec<String> {
        outcome.result.iter().map(|p| p.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_single_page_without_links() {
        let site = FakeSite::default().page("/docs", &doc("Home", &[])).shared();
        let outcome = crawl(&site, &config(3), "/docs").await;

        assert_eq!(outcome.state, CrawlState::Completed);
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.stats.urls_enqueued, 1);
        assert_eq!(outcome.stats.urls_visited, 1);
        assert_eq!(outcome.stats.urls_discarded, 0);
    }

    #[tokio::test]
    async fn test_external_links_not_enqueued() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/a", "/docs/b", "http://other.example/x"]))
            .page("/docs/a", &doc("A", &[]))
            .page("/docs/b", &doc("B", &[]))
            .shared();
        let outcome = crawl(&site, &config(3), "/docs").await;

        assert_eq!(titles(&outcome), vec!["Home", "A", "B"]);
        assert_eq!(outcome.stats.urls_enqueued, 3);
        assert!(site.requested().iter().all(|u| !u.contains("other.example")));
    }

    #[tokio::test]
    async fn test_asset_links_never_fetched() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/a.png", "/docs/a"]))
            .page("/docs/a", &doc("A", &["/docs/a.png"]))
            .shared();
        let outcome = crawl(&site, &config(5), "/docs").await;

        assert_eq!(outcome.result.len(), 2);
        assert!(site.requested().iter().all(|u| !u.ends_with(".png")));
    }

    #[tokio::test]
    async fn test_depth_zero_only_start_page() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/a", "/docs/b"]))
            .page("/docs/a", &doc("A", &[]))
            .page("/docs/b", &doc("B", &[]))
            .shared();
        let outcome = crawl(&site, &config(0), "/docs").await;

        assert_eq!(titles(&outcome), vec!["Home"]);
        assert_eq!(site.requested(), vec![format!("{}/docs", SITE)]);
        assert_eq!(outcome.stats.urls_enqueued, 1);
    }

    #[tokio::test]
    async fn test_zero_deadline_times_out() {
        let site = FakeSite::default().page("/docs", &doc("Home", &["/docs/a"])).shared();
        let mut config = config(3);
        config.crawler.timeout_minutes = 0;
        let outcome = crawl(&site, &config, "/docs").await;

        assert_eq!(outcome.state, CrawlState::TimedOut);
        assert!(outcome.result.is_empty());
        assert_eq!(outcome.stats.urls_discarded, 1);
        assert!(site.requested().is_empty());
    }

    #[tokio::test]
    async fn test_unrepresentable_deadline_runs_to_completion() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/a"]))
            .page("/docs/a", &doc("A", &[]))
            .shared();
        let mut config = config(3);
        config.crawler.timeout_minutes = u64::MAX;
        let outcome = crawl(&site, &config, "/docs").await;

        assert_eq!(outcome.state, CrawlState::Completed);
        assert_eq!(titles(&outcome), vec!["Home", "A"]);
    }

    #[tokio::test]
    async fn test_same_canonical_url_extracted_once() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/a", "/docs/b"]))
            .page("/docs/a", &doc("A", &["/docs/c", "/docs"]))
            .page("/docs/b", &doc("B", &["/docs/c/", "/docs//c"]))
            .page("/docs/c", &doc("C", &["/docs/a"]))
            .page("/docs/c/", &doc("C", &[]))
            .shared();
        let outcome = crawl(&site, &config(3), "/docs").await;

        assert_eq!(titles(&outcome), vec!["Home", "A", "B", "C"]);
        let c_fetches = site
            .requested()
            .iter()
            .filter(|u| u.contains("/c"))
            .count();
        assert_eq!(c_fetches, 1);
    }

    #[tokio::test]
    async fn test_fifo_append_order() {
        let site = FakeSite::default()
            .page("/", &doc("Root", &["/a", "/b"]))
            .page("/a", &doc("A", &["/a/deep"]))
            .page("/b", &doc("B", &[]))
            .page("/a/deep", &doc("Deep", &[]))
            .shared();
        let outcome = crawl(&site, &config(3), "/").await;

        assert_eq!(titles(&outcome), vec!["Root", "A", "B", "Deep"]);
    }

    #[tokio::test]
    async fn test_depth_limit_respected() {
        let site = FakeSite::default()
            .page("/0", &doc("Zero", &["/1"]))
            .page("/1", &doc("One", &["/2"]))
            .page("/2", &doc("Two", &["/3"]))
            .page("/3", &doc("Three", &[]))
            .shared();
        let outcome = crawl(&site, &config(2), "/0").await;

        assert_eq!(titles(&outcome), vec!["Zero", "One", "Two"]);
        assert!(!site.requested().iter().any(|u| u.ends_with("/3")));
    }

    #[tokio::test]
    async fn test_failed_page_skipped_and_not_retried() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/missing", "/docs/a"]))
            .page("/docs/a", &doc("A", &["/docs/missing"]))
            .shared();
        let outcome = crawl(&site, &config(3), "/docs").await;

        assert_eq!(outcome.state, CrawlState::Completed);
        assert_eq!(titles(&outcome), vec!["Home", "A"]);
        assert_eq!(outcome.stats.pages_skipped, 1);
        let missing = site
            .requested()
            .iter()
            .filter(|u| u.ends_with("/missing"))
            .count();
        assert_eq!(missing, 1);
    }

    #[tokio::test]
    async fn test_empty_pages_dropped() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/empty"]))
            .page("/docs/empty", "<html><body><nav>menu only</nav></body></html>")
            .shared();
        let outcome = crawl(&site, &config(3), "/docs").await;

        assert_eq!(outcome.result.len(), 1);
        assert!(outcome.result.iter().all(|p| !p.content.is_empty()));
        assert_eq!(outcome.stats.pages_skipped, 1);
    }

    #[tokio::test]
    async fn test_failed_start_page_yields_empty_result() {
        let site = FakeSite::default().shared();
        let outcome = crawl(&site, &config(3), "/docs").await;

        assert_eq!(outcome.state, CrawlState::Completed);
        assert!(outcome.result.is_empty());
        assert_eq!(outcome.stats.urls_visited, 1);
    }

    #[tokio::test]
    async fn test_visited_never_exceeds_enqueued() {
        let site = FakeSite::default()
            .page("/", &doc("Root", &["/a", "/b", "/c"]))
            .page("/a", &doc("A", &["/", "/b", "/c"]))
            .page("/b", &doc("B", &["/", "/a", "/c"]))
            .page("/c", &doc("C", &["/", "/a", "/b"]))
            .shared();
        let outcome = crawl(&site, &config(4), "/").await;

        assert_eq!(outcome.result.len(), 4);
        assert!(outcome.stats.urls_visited <= outcome.stats.urls_enqueued);
        assert_eq!(site.requested().len(), 4);
    }

    #[tokio::test]
    async fn test_progress_reported_per_page() {
        let site = FakeSite::default()
            .page("/docs", &doc("Home", &["/docs/a"]))
            .page("/docs/a", &doc("A", &[]))
            .shared();
        let (tx, mut rx) = unbounded_channel();
        let start = Url::parse(&format!("{}/docs", SITE)).unwrap();
        let crawler = Crawler::new(&config(3), start, site, ChannelProgress::new(tx)).unwrap();
        assert_eq!(crawler.state(), CrawlState::Idle);

        let outcome = crawler.run().await;
        assert!(outcome.state.is_terminal());

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.step == step::EXTRACT));
        assert_eq!(events[0].message, "Extracting documentation (0 pages found)");
        assert_eq!(events[1].message, "Extracting documentation (1 pages found)");
        assert!(events[1].detail.ends_with("/docs/a"));
    }

    #[test]
    fn test_rejects_start_url_without_host() {
        let site = FakeSite::default().shared();
        let start = Url::parse("file:///tmp/docs.html").unwrap();
        assert!(Crawler::new(&config(1), start, site, NoProgress).is_err());
    }
}
