//! Link discovery
//!
//! Enumerates the outbound hyperlinks of a parsed page as absolute,
//! de-duplicated URLs. No documentation filtering happens here; the crawl
//! engine applies the URL classifier to whatever this module returns.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// Discovers all outbound links on a page
///
/// # Link Rules
///
/// **Include:**
/// - every `<a href="...">`, resolved against `page_url`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that does not resolve to an http(s) URL
///
/// Duplicates (compared as serialized absolute URLs) are dropped; the first
/// occurrence keeps its position so the result follows document order.
///
/// # Example
///
/// ```
/// use doc_dossier::crawler::discover_links;
/// use scraper::Html;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<a href="/a">A</a><a href="/a">again</a><a href="b">B</a>"#);
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let links = discover_links(&html, &base);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[1].as_str(), "https://example.com/docs/b");
/// ```
pub fn discover_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute_url) = resolve_link(href, page_url) {
            if seen.insert(absolute_url.as_str().to_string()) {
                links.push(absolute_url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}
