//! Documentation jobs
//!
//! A job is one end-to-end request: crawl the site behind a URL, assemble the
//! pages, render them in the requested format, and hand the artifact to a
//! store. Progress is reported in seven steps.

use crate::config::Config;
use crate::crawler::{CrawlState, CrawlStats, Crawler, Fetcher, HttpFetcher};
use crate::document::assemble;
use crate::export::{artifact_name, ArtifactStore, ExportFormat, FsStore};
use crate::progress::{step, ProgressEvent, ProgressSink};
use crate::url::parse_start_url;
use crate::DossierError;

/// Summary of a finished job
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Where the store put the artifact
    pub location: String,

    /// Artifact file name
    pub artifact: String,

    pub format: ExportFormat,

    /// Number of pages in the artifact
    pub pages: usize,

    /// How the crawl ended
    pub crawl_state: CrawlState,

    pub stats: CrawlStats,
}

/// Runs a documentation job with caller-supplied collaborators
///
/// # Arguments
///
/// * `config` - The full configuration
/// * `url` - Start URL of the documentation site
/// * `format` - Output format
/// * `fetcher` - Fetch collaborator handed to the crawler
/// * `progress` - Receives the job's step events
/// * `store` - Receives the rendered artifact
///
/// # Returns
///
/// * `Ok(JobReport)` - The artifact was written
/// * `Err(DossierError::NothingFound)` - The crawl produced no pages
/// * `Err(DossierError)` - The URL was invalid or the artifact could not be stored
pub async fn run_job<F, P, S>(
    config: &Config,
    url: &str,
    format: ExportFormat,
    fetcher: F,
    progress: P,
    store: &S,
) -> Result<JobReport, DossierError>
where
    F: Fetcher,
    P: ProgressSink + Clone,
    S: ArtifactStore + ?Sized,
{
    progress.report(ProgressEvent::new(
        step::START,
        "Starting documentation download",
        format!("Initializing crawler for {}", url),
    ));

    let result = execute(config, url, format, fetcher, progress.clone(), store).await;

    match &result {
        Ok(report) => tracing::info!(
            "Job finished: {} pages written to {}",
            report.pages,
            report.location
        ),
        Err(DossierError::NothingFound { .. }) => {}
        Err(e) => {
            tracing::error!("Job failed for {}: {}", url, e);
            progress.report(ProgressEvent::new(
                step::COMPLETE,
                "Error occurred",
                format!("Error processing documentation: {}", e),
            ));
        }
    }

    result
}

/// Runs a documentation job over HTTP, writing into the configured output directory
pub async fn run_http_job<P>(
    config: &Config,
    url: &str,
    format: ExportFormat,
    progress: P,
) -> Result<JobReport, DossierError>
where
    P: ProgressSink + Clone,
{
    let fetcher = HttpFetcher::new(&config.crawler)?;
    let store = FsStore::new(&config.output.directory);
    run_job(config, url, format, fetcher, progress, &store).await
}

async fn execute<F, P, S>(
    config: &Config,
    url: &str,
    format: ExportFormat,
    fetcher: F,
    progress: P,
    store: &S,
) -> Result<JobReport, DossierError>
where
    F: Fetcher,
    P: ProgressSink + Clone,
    S: ArtifactStore + ?Sized,
{
    let start_url = parse_start_url(url)?;

    progress.report(ProgressEvent::new(
        step::VISIT,
        "Visiting the URL",
        format!("Connecting to {}", start_url),
    ));

    let crawler = Crawler::new(config, start_url.clone(), fetcher, progress.clone())?;
    let outcome = crawler.run().await;

    if outcome.result.is_empty() {
        progress.report(ProgressEvent::new(
            step::COMPLETE,
            "No pages found",
            "Unable to extract any documentation",
        ));
        return Err(DossierError::NothingFound {
            url: start_url.to_string(),
        });
    }

    if outcome.state == CrawlState::TimedOut {
        tracing::info!(
            "Crawl timed out; exporting the {} pages collected so far",
            outcome.result.len()
        );
    }

    progress.report(ProgressEvent::new(
        step::EXTRACTED,
        "Documentation extracted",
        format!("Successfully extracted {} pages", outcome.result.len()),
    ));

    let label = match format {
        ExportFormat::Html => "HTML",
        ExportFormat::Markdown => "Markdown",
    };
    progress.report(ProgressEvent::new(
        step::CREATE_FILE,
        format!("Creating {} file", label),
        format!("Generating {} from extracted content", label),
    ));

    let document = assemble(&outcome.result, &config.output.document_title);
    let artifact = artifact_name(format, &document.generated_at);
    let bytes = format.render(&document);
    let location = store.store(&artifact, &bytes)?;

    progress.report(ProgressEvent::new(
        step::FILE_READY,
        format!("{} file created", label),
        format!("File: {}", artifact),
    ));
    progress.report(ProgressEvent::new(
        step::COMPLETE,
        "Download complete!",
        format!("Saved to {}", location),
    ));

    Ok(JobReport {
        location,
        artifact,
        format,
        pages: document.page_count(),
        crawl_state: outcome.state,
        stats: outcome.stats,
    })
}
