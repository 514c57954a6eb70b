use crate::UrlError;
use url::Url;

/// The site a crawl is confined to
///
/// Two URLs belong to the same site when their lowercase host and explicit
/// port match (the `host[:port]` authority). The scheme is ignored so that an
/// `http` start page may follow links to its `https` twin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteOrigin {
    host: String,
    port: Option<u16>,
}

impl SiteOrigin {
    /// Derives the site origin from a URL
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use doc_dossier::url::SiteOrigin;
    ///
    /// let origin = SiteOrigin::from_url(&Url::parse("https://Docs.Example.com/guide").unwrap()).unwrap();
    /// assert_eq!(origin.host(), "docs.example.com");
    /// ```
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        let host = url.host_str().ok_or(UrlError::MissingHost)?;
        Ok(Self {
            host: host.to_lowercase(),
            port: url.port(),
        })
    }

    /// The lowercase host name
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if `url` is served by this site
    pub fn contains(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => {
                host.eq_ignore_ascii_case(&self.host) && url.port() == self.port
            }
            None => false,
        }
    }
}

/// Parses and checks a crawl start URL
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn parse_start_url(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_origin_lowercases_host() {
        let origin = SiteOrigin::from_url(&url("https://EXAMPLE.COM/")).unwrap();
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_contains_same_host() {
        let origin = SiteOrigin::from_url(&url("https://example.com/docs")).unwrap();
        assert!(origin.contains(&url("https://example.com/docs/a")));
        assert!(origin.contains(&url("https://Example.com/other")));
    }

    #[test]
    fn test_contains_rejects_other_host() {
        let origin = SiteOrigin::from_url(&url("https://example.com/")).unwrap();
        assert!(!origin.contains(&url("https://other.example/x")));
        assert!(!origin.contains(&url("https://sub.example.com/x")));
    }

    #[test]
    fn test_contains_checks_port() {
        let origin = SiteOrigin::from_url(&url("http://127.0.0.1:8080/")).unwrap();
        assert!(origin.contains(&url("http://127.0.0.1:8080/a")));
        assert!(!origin.contains(&url("http://127.0.0.1:9090/a")));
    }

    #[test]
    fn test_parse_start_url() {
        assert!(parse_start_url("https://example.com/docs").is_ok());
        assert!(parse_start_url("  http://example.com  ").is_ok());
        assert!(matches!(
            parse_start_url("ftp://example.com/"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(parse_start_url("not a url"), Err(UrlError::Parse(_))));
    }
}
