//! Export module for rendering and storing assembled documents
//!
//! This module handles:
//! - Rendering a [`StructuredDocument`] to print-ready HTML or Markdown
//! - Naming output artifacts
//! - Writing artifacts through the [`ArtifactStore`] seam

mod html;
mod markdown;
mod store;

pub use html::{format_html, render_html, TOC_TITLE_MAX_CHARS};
pub use markdown::{format_markdown, render_markdown};
pub use store::{ArtifactStore, FsStore};

use crate::document::StructuredDocument;
use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write artifact: {0}")]
    Write(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Output format of the assembled document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Paginated HTML meant to be printed to PDF
    #[default]
    Html,
    Markdown,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }

    /// Renders `document` in this format
    pub fn render(&self, document: &StructuredDocument) -> Vec<u8> {
        match self {
            Self::Html => render_html(document),
            Self::Markdown => render_markdown(document),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    /// Accepts `html`, `pdf`, `markdown`, and `md` in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "pdf" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown format '{}' (expected html, pdf, markdown, or md)",
                other
            )),
        }
    }
}

/// Builds the artifact file name for a document generated at `at`
///
/// # Example
///
/// ```
/// use chrono::{Local, TimeZone};
/// use doc_dossier::export::{artifact_name, ExportFormat};
///
/// let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
/// assert_eq!(artifact_name(ExportFormat::Markdown, &at), "documentation_20240305_143009.md");
/// ```
pub fn artifact_name(format: ExportFormat, at: &DateTime<Local>) -> String {
    format!(
        "documentation_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
