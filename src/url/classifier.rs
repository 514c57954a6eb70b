use crate::config::FilterConfig;
use crate::url::SiteOrigin;
use url::Url;

/// Decides whether a candidate URL is a documentation page worth crawling
///
/// All of the following must hold:
/// 1. The candidate is served by the same site as the crawl origin
/// 2. The lowercase path does not end in a skipped asset extension
/// 3. The serialized URL carries neither a fragment (`#`) nor a query (`?`)
/// 4. The lowercase path contains none of the skipped path substrings
///
/// The decision is a pure function of its arguments.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_dossier::config::FilterConfig;
/// use doc_dossier::url::{is_documentation_url, SiteOrigin};
///
/// let origin = SiteOrigin::from_url(&Url::parse("https://example.com/docs").unwrap()).unwrap();
/// let filter = FilterConfig::default();
///
/// let page = Url::parse("https://example.com/docs/intro").unwrap();
/// assert!(is_documentation_url(&page, &origin, &filter));
///
/// let image = Url::parse("https://example.com/docs/logo.png").unwrap();
/// assert!(!is_documentation_url(&image, &origin, &filter));
/// ```
pub fn is_documentation_url(candidate: &Url, origin: &SiteOrigin, filter: &FilterConfig) -> bool {
    // Rule 1: no cross-site follow
    if !origin.contains(candidate) {
        tracing::trace!("Rejecting {}: different site", candidate);
        return false;
    }

    let path = candidate.path().to_lowercase();

    // Rule 2: assets
    if filter
        .skip_extensions
        .iter()
        .any(|ext| path.ends_with(&ext.to_lowercase()))
    {
        tracing::trace!("Rejecting {}: asset extension", candidate);
        return false;
    }

    // Rule 3: no fragments or queries
    let serialized = candidate.as_str();
    if serialized.contains('#') || serialized.contains('?') {
        tracing::trace!("Rejecting {}: fragment or query", candidate);
        return false;
    }

    // Rule 4: non-documentation sections
    if filter
        .skip_paths
        .iter()
        .any(|skip| path.contains(&skip.to_lowercase()))
    {
        tracing::trace!("Rejecting {}: excluded path", candidate);
        return false;
    }

    true
}

/// A URL classifier bound to one site and one filter configuration
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    origin: SiteOrigin,
    filter: FilterConfig,
}

impl UrlClassifier {
    /// Creates a classifier for the given site
    pub fn new(origin: SiteOrigin, filter: FilterConfig) -> Self {
        Self { origin, filter }
    }

    /// The site this classifier confines links to
    pub fn origin(&self) -> &SiteOrigin {
        &self.origin
    }

    /// See [`is_documentation_url`]
    pub fn accepts(&self, candidate: &Url) -> bool {
        is_documentation_url(candidate, &self.origin, &self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> UrlClassifier {
        let start = Url::parse("https://example.com/docs/").unwrap();
        UrlClassifier::new(
            SiteOrigin::from_url(&start).unwrap(),
            FilterConfig::default(),
        )
    }

    fn accepts(s: &str) -> bool {
        classifier().accepts(&Url::parse(s).unwrap())
    }

    #[test]
    fn test_accepts_same_site_page() {
        assert!(accepts("https://example.com/docs/a"));
        assert!(accepts("https://example.com/guide/getting-started.html"));
        assert!(accepts("https://example.com/"));
    }

    #[test]
    fn test_rejects_other_host() {
        assert!(!accepts("http://other.example/x"));
        assert!(!accepts("https://cdn.example.com/docs/a"));
    }

    #[test]
    fn test_rejects_assets() {
        assert!(!accepts("https://example.com/docs/a.png"));
        assert!(!accepts("https://example.com/static/site.CSS"));
        assert!(!accepts("https://example.com/app.js"));
        assert!(!accepts("https://example.com/manual.pdf"));
        assert!(!accepts("https://example.com/release.tar.gz"));
    }

    #[test]
    fn test_rejects_fragment_and_query() {
        assert!(!accepts("https://example.com/docs/a#section"));
        assert!(!accepts("https://example.com/docs/a#"));
        assert!(!accepts("https://example.com/docs/a?page=2"));
    }

    #[test]
    fn test_rejects_excluded_paths() {
        assert!(!accepts("https://example.com/login"));
        assert!(!accepts("https://example.com/account/signup"));
        assert!(!accepts("https://example.com/search"));
        assert!(!accepts("https://example.com/api/v1/users"));
        assert!(!accepts("https://example.com/Admin/panel"));
        assert!(!accepts("https://example.com/downloads/latest"));
        assert!(!accepts("https://example.com/docs/edit/intro"));
    }

    #[test]
    fn test_api_reference_without_trailing_slash_is_kept() {
        // "/api/" only matches as a directory
        assert!(accepts("https://example.com/docs/api-reference"));
    }

    #[test]
    fn test_custom_filter() {
        let origin = SiteOrigin::from_url(&Url::parse("https://example.com/").unwrap()).unwrap();
        let filter = FilterConfig {
            skip_extensions: vec![".txt".to_string()],
            skip_paths: vec!["/private".to_string()],
        };
        let check = |s: &str| is_documentation_url(&Url::parse(s).unwrap(), &origin, &filter);

        assert!(check("https://example.com/logo.png"));
        assert!(!check("https://example.com/notes.txt"));
        assert!(!check("https://example.com/private/a"));
        assert!(check("https://example.com/login"));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = classifier();
        let candidates = [
            "https://example.com/docs/a",
            "https://example.com/docs/a.png",
            "https://other.example/x",
            "https://example.com/search",
        ];
        for candidate in candidates {
            let url = Url::parse(candidate).unwrap();
            let first = classifier.accepts(&url);
            for _ in 0..5 {
                assert_eq!(classifier.accepts(&url), first);
            }
        }
    }
}
