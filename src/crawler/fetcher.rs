//! HTTP fetcher implementation
//!
//! This module defines the fetch collaborator consumed by the crawl engine and
//! its reqwest-backed implementation, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests to fetch page content
//! - Error classification (status, timeout, connection, content type)

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum number of redirects followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against this
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Page body content
    pub body: String,
}

/// Reasons a single fetch can fail
///
/// The crawl engine treats every variant the same way: the URL is skipped and
/// the crawl continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Fetches raw pages for the crawl engine
///
/// Implementations must bound each call with their own timeout so a single
/// unresponsive host cannot stall a run past one page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one URL
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent and request timeout)
///
/// # Example
///
/// ```no_run
/// use doc_dossier::config::CrawlerConfig;
/// use doc_dossier::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = config.request_timeout();

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`Fetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// # Error Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with HTML (or no) Content-Type | `Ok(FetchedPage)` |
/// | non-2xx status | `FetchError::Status` |
/// | non-HTML Content-Type | `FetchError::ContentMismatch` |
/// | timeout | `FetchError::Timeout` |
/// | connection refused / DNS / TLS | `FetchError::Connect` |
/// | anything else | `FetchError::Transport` |
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return Err(FetchError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        url: final_url,
        status: status.as_u16(),
        body,
    })
}

/// Servers that omit Content-Type get the benefit of the doubt
fn is_html_content_type(content_type: &str) -> bool {
    if content_type.is_empty() {
        return true;
    }
    let lowered = content_type.to_ascii_lowercase();
    lowered.contains("text/html") || lowered.contains("application/xhtml")
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
