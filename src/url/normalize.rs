use url::Url;

/// Computes the canonical form of a URL used for visited-set membership
///
/// # Canonicalization Steps
///
/// 1. Host and port come from the parser, which lowercases http(s) hosts
///    and drops a default port
/// 2. Normalize path:
///    - Collapse repeated slashes
///    - Remove dot segments (. and ..)
///    - Remove trailing slash (except for root /)
/// 3. Remove fragment (everything after #)
///
/// The query string is kept: two pages that differ only in their query are
/// different pages.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_dossier::url::canonicalize;
///
/// let url = Url::parse("https://EXAMPLE.COM:443/docs//guide/#intro").unwrap();
/// assert_eq!(canonicalize(&url), "https://example.com/docs/guide");
/// ```
pub fn canonicalize(url: &Url) -> String {
    let mut canonical = url.clone();

    let normalized_path = normalize_path(canonical.path());
    canonical.set_path(&normalized_path);
    canonical.set_fragment(None);

    canonical.to_string()
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let mut normalized_segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            // Skip empty segments (from multiple slashes) and current directory markers
            "" | "." => continue,
            ".." => {
                normalized_segments.pop();
            }
            _ => normalized_segments.push(segment),
        }
    }

    if normalized_segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", normalized_segments.join("/"))
}
