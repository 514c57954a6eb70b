//! Doc-Dossier: documentation site harvester
//!
//! This crate crawls the pages of a documentation site reachable from a starting URL,
//! extracts the readable content of each page, and assembles the result into a single
//! print-ready HTML document or a Markdown dossier.

pub mod config;
pub mod crawler;
pub mod document;
pub mod export;
pub mod job;
pub mod progress;
pub mod url;

use thiserror::Error;

/// Main error type for Doc-Dossier operations
#[derive(Debug, Error)]
pub enum DossierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

    #[error("No documentation content found at {url}")]
    NothingFound { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Doc-Dossier operations
pub type Result<T> = std::result::Result<T, DossierError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, CrawlResult, CrawlState, Crawler, ExtractedPage};
pub use document::{assemble, Block, StructuredDocument};
pub use export::{render_html, render_markdown, ExportFormat};
pub use crate::url::{canonicalize, is_documentation_url, parse_start_url, SiteOrigin};
