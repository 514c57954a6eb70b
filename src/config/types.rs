use serde::Deserialize;
use std::time::Duration;

/// Browser-like user agent; many documentation hosts reject obvious bot strings
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Doc-Dossier
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub filter: FilterConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of link hops from the start URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Overall run deadline (minutes)
    #[serde(rename = "timeout-minutes")]
    pub timeout_minutes: u64,

    /// Timeout for a single fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Pause between successive fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl CrawlerConfig {
    /// Total time budget for one crawl run
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_minutes.saturating_mul(60))
    }

    /// Per-request timeout handed to the HTTP client
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Politeness delay between fetches
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            timeout_minutes: 10,
            request_timeout_secs: 10,
            request_delay_ms: 500,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Link filtering rules used by the URL classifier
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Path suffixes that mark a URL as an asset rather than a page
    #[serde(rename = "skip-extensions")]
    pub skip_extensions: Vec<String>,

    /// Path substrings that mark a URL as non-documentation
    #[serde(rename = "skip-paths")]
    pub skip_paths: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_extensions: to_strings(&[
                ".png", ".jpg", ".jpeg", ".gif", ".svg", ".css", ".js", ".json", ".pdf", ".zip",
                ".tar.gz", ".mp4", ".mp3", ".avi", ".exe", ".dmg", ".deb", ".rpm",
            ]),
            skip_paths: to_strings(&[
                "/login",
                "/register",
                "/signup",
                "/signin",
                "/search",
                "/api/",
                "/admin",
                "/download",
                "/downloads",
                "/edit",
                "/delete",
            ]),
        }
    }
}

/// CSS selectors driving title and content extraction
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Title candidates, tried in order
    #[serde(rename = "title-selectors")]
    pub title_selectors: Vec<String>,

    /// Main-content containers, tried in order
    #[serde(rename = "content-selectors")]
    pub content_selectors: Vec<String>,

    /// Subtrees removed before content extraction
    #[serde(rename = "strip-selectors")]
    pub strip_selectors: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_selectors: to_strings(&["h1", "title", ".page-title", ".doc-title", ".content-title"]),
            content_selectors: to_strings(&[
                "main",
                ".content",
                ".main-content",
                ".doc-content",
                ".documentation",
                ".article",
                "article",
                ".page-content",
                ".markdown-body",
                ".rst-content",
            ]),
            strip_selectors: to_strings(&[
                "script",
                "style",
                "nav",
                "header",
                "footer",
                "aside",
                ".sidebar",
                ".navigation",
            ]),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the exported artifact is written to
    pub directory: String,

    /// Heading used on the title page of the export
    #[serde(rename = "document-title")]
    pub document_title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "downloads".to_string(),
            document_title: "Documentation".to_string(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
