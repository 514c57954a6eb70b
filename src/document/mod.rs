//! Document assembly
//!
//! Turns the pages of a crawl into a format-agnostic [`StructuredDocument`]:
//! per-page titles, source URLs, and classified content blocks. Exporters
//! consume the structured document; nothing here touches the network or the
//! filesystem.

mod blocks;

pub use blocks::{classify_block, clean_text, split_blocks, split_candidates, Block};

use crate::crawler::{CrawlResult, ExtractedPage};
use chrono::{DateTime, Local};
use url::Url;

/// One page of the assembled document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPage {
    pub title: String,
    pub url: Url,
    pub blocks: Vec<Block>,
}

impl DocumentPage {
    /// Builds a page by classifying the extracted content
    pub fn from_extracted(page: &ExtractedPage) -> Self {
        Self {
            title: page.title.clone(),
            url: page.url.clone(),
            blocks: split_blocks(&page.content),
        }
    }
}

/// All crawled pages as typed content blocks, ready for export
#[derive(Debug, Clone)]
pub struct StructuredDocument {
    /// Document heading
    pub title: String,

    /// When the document was assembled
    pub generated_at: DateTime<Local>,

    /// Pages in crawl order
    pub pages: Vec<DocumentPage>,
}

impl StructuredDocument {
    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Assembles a crawl result into a structured document stamped with the current time
///
/// # Arguments
///
/// * `result` - Pages in extraction order
/// * `title` - Heading of the assembled document
///
/// # Example
///
/// ```
/// use doc_dossier::crawler::{CrawlResult, ExtractedPage};
/// use doc_dossier::document::{assemble, Block};
/// use url::Url;
///
/// let result = CrawlResult::new(vec![ExtractedPage {
///     url: Url::parse("https://example.com/docs").unwrap(),
///     title: "Intro".to_string(),
///     content: "OVERVIEW\n\nThis page explains how the tool is meant to be used.".to_string(),
/// }]);
/// let document = assemble(&result, "Documentation");
/// assert_eq!(document.pages[0].blocks.len(), 2);
/// assert!(matches!(document.pages[0].blocks[0], Block::Heading { .. }));
/// ```
pub fn assemble(result: &CrawlResult, title: &str) -> StructuredDocument {
    assemble_at(result, title, Local::now())
}

/// Assembles a crawl result with an explicit generation timestamp
pub fn assemble_at(result: &CrawlResult, title: &str, generated_at: DateTime<Local>) -> StructuredDocument {
    let pages: Vec<DocumentPage> = result.iter().map(DocumentPage::from_extracted).collect();

    tracing::debug!(
        "Assembled {} pages into {} blocks",
        pages.len(),
        pages.iter().map(|p| p.blocks.len()).sum::<usize>()
    );

    StructuredDocument {
        title: title.to_string(),
        generated_at,
        pages,
    }
}
