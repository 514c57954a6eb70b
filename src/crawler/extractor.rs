//! Page content extraction
//!
//! Turns a parsed page into a title and a plain-text body with navigational
//! chrome removed. Selector lists come from [`ExtractionConfig`] and are
//! compiled once per crawl.

use crate::config::{parse_selector, ExtractionConfig};
use crate::ConfigError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title used when neither the markup nor the URL path yields one
pub const FALLBACK_TITLE: &str = "Documentation Page";

/// A page whose content survived extraction
///
/// `content` is never empty; pages without content are dropped before one of
/// these is built. The parsed tree is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// The URL the page was requested under
    pub url: Url,

    /// Page title
    pub title: String,

    /// Plain-text content, whitespace-trimmed
    pub content: String,
}

/// Extracts titles and main content from parsed pages
#[derive(Debug, Clone)]
pub struct PageExtractor {
    title_selectors: Vec<Selector>,
    content_selectors: Vec<Selector>,
    strip_selectors: Vec<Selector>,
}

impl PageExtractor {
    /// Compiles the configured selector lists
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let compile = |selectors: &[String]| -> Result<Vec<Selector>, ConfigError> {
            selectors.iter().map(|s| parse_selector(s)).collect()
        };

        Ok(Self {
            title_selectors: compile(&config.title_selectors)?,
            content_selectors: compile(&config.content_selectors)?,
            strip_selectors: compile(&config.strip_selectors)?,
        })
    }

    /// Extracts a page, returning None when no content remains
    ///
    /// # Example
    ///
    /// ```
    /// use doc_dossier::crawler::PageExtractor;
    /// use scraper::Html;
    /// use url::Url;
    ///
    /// let html = Html::parse_document(
    ///     "<html><body><nav>Menu</nav><main><h1>Intro</h1><p>Hello.</p></main></body></html>",
    /// );
    /// let url = Url::parse("https://example.com/docs/intro").unwrap();
    /// let page = PageExtractor::default().extract(&html, &url).unwrap();
    /// assert_eq!(page.title, "Intro");
    /// assert!(!page.content.contains("Menu"));
    /// ```
    pub fn extract(&self, document: &Html, page_url: &Url) -> Option<ExtractedPage> {
        let content = self.extract_content(document);
        if content.is_empty() {
            return None;
        }

        Some(ExtractedPage {
            url: page_url.clone(),
            title: self.extract_title(document, page_url),
            content,
        })
    }

    /// Extracts the page title
    ///
    /// The first match of each title selector is tried in order; the first
    /// non-empty text wins, with whitespace runs collapsed to single spaces.
    /// Falls back to the last non-empty path segment of the URL, then to
    /// [`FALLBACK_TITLE`].
    pub fn extract_title(&self, document: &Html, page_url: &Url) -> String {
        for selector in &self.title_selectors {
            if let Some(element) = document.select(selector).next() {
                let title = title_text(element);
                if !title.is_empty() {
                    return title;
                }
            }
        }

        title_from_url(page_url)
    }

    /// Extracts the main content as trimmed plain text
    ///
    /// Works on a copy of the tree; `document` is left untouched.
    pub fn extract_content(&self, document: &Html) -> String {
        let mut working = document.clone();
        strip_subtrees(&mut working, &self.strip_selectors);

        for selector in &self.content_selectors {
            if let Some(container) = working.select(selector).next() {
                return element_text(container);
            }
        }

        if let Some(body) = working.select(&BODY_SELECTOR).next() {
            return element_text(body);
        }

        element_text(working.root_element())
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default()).expect("default extraction selectors are valid")
    }
}

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("static selector is valid"));

/// Detaches every subtree matching one of `selectors`
fn strip_subtrees(document: &mut Html, selectors: &[Selector]) {
    for selector in selectors {
        let ids: Vec<_> = document.select(selector).map(|element| element.id()).collect();
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Element text on one line
fn title_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

fn title_from_url(page_url: &Url) -> String {
    page_url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|segment| segment.to_string())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}
