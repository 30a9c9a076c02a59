// src/crawl/scope.rs
// =============================================================================
// Decides which links the crawler is allowed to walk into.
//
// A link is followed only when:
// 1. It is on exactly the same origin as the seed (scheme + host + port,
//    no subdomain matching)
// 2. Its path does not end in a skipped file extension
// 3. It has not been visited yet
// 4. It is not a mailto:, tel:, javascript: or fragment-only reference
//
// This filter only controls traversal. Every link and image is still
// checked for liveness whether or not it passes.
//
// Rust concepts:
// - Option<T> with `?`: a URL without a host simply has no origin
// - let-else: bail out early when parsing fails
// =============================================================================

use std::collections::HashSet;
use url::Url;

// References starting with these are never pages we can crawl
const SKIPPED_PREFIXES: [&str; 4] = ["mailto:", "tel:", "javascript:", "#"];

// Builds the "scheme://host[:port]" string used for origin comparison
//
// The port only appears when it differs from the scheme's default,
// so "https://example.com:443/" and "https://example.com/" share an origin.
//
// Parameters:
//   url: an already parsed URL
//
// Returns: Some(origin), or None for host-less URLs like mailto:
pub fn origin_of(url: &Url) -> Option<String> {
    // mailto:, data:, file: etc. have no host
    let host = url.host_str()?;

    // port() is None when the port is the scheme's default
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

// The traversal rules for one crawl
//
// Built once from the seed URL and shared (by reference) with every visit
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    /// "scheme://host[:port]" of the seed
    origin: String,
    /// Lowercased, with the leading dot (".pdf"), ready for ends_with()
    skip_extensions: Vec<String>,
}

impl ScopeFilter {
    /// Creates a filter for the origin of `seed`
    ///
    /// Extensions are given without the leading dot.
    //
    // Parameters:
    //   seed: the crawl's starting URL
    //   skip_extensions: e.g. ["pdf", "zip"]; a leading dot is tolerated
    //
    // Returns: None if the seed has no host (no origin to stay on)
    pub fn new(seed: &Url, skip_extensions: &[String]) -> Option<Self> {
        Some(Self {
            origin: origin_of(seed)?,
            // "PDF" and ".pdf" both become ".pdf"
            skip_extensions: skip_extensions
                .iter()
                .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
                .collect(),
        })
    }

    // The origin every crawled page must share (used for logging)
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns true if `url` may be crawled as a new page
    //
    // Parameters:
    //   url: an absolute URL produced by the page analyzer
    //   visited: pages already fetched in this crawl
    //
    // Returns: false as soon as any rejection rule matches
    pub fn is_crawlable(&self, url: &str, visited: &HashSet<String>) -> bool {
        // Rule 4: special schemes and bare fragments
        if SKIPPED_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
            return false;
        }

        // Rule 3: exact string match against the visited set
        if visited.contains(url) {
            return false;
        }

        // Unparseable URLs can't be compared, so they're out of scope
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        // Rule 1: same scheme, host and port as the seed
        if origin_of(&parsed).as_deref() != Some(self.origin.as_str()) {
            return false;
        }

        // Rule 2: documents and images are checked, never crawled
        !self.has_skipped_extension(&parsed)
    }

    // Checks the URL path (not the query string) against the block list,
    // ignoring case: "/Report.PDF" is skipped just like "/report.pdf"
    fn has_skipped_extension(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.skip_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SKIP_EXTENSIONS;

    fn filter() -> ScopeFilter {
        let seed = Url::parse("https://example.com/en/home").unwrap();
        let extensions: Vec<String> = DEFAULT_SKIP_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        ScopeFilter::new(&seed, &extensions).unwrap()
    }

    #[test]
    fn test_origin_of() {
        let url = Url::parse("http://127.0.0.1:8080/a/b").unwrap();
        assert_eq!(origin_of(&url).as_deref(), Some("http://127.0.0.1:8080"));

        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(origin_of(&url).as_deref(), Some("https://example.com"));

        let url = Url::parse("mailto:me@example.com").unwrap();
        assert_eq!(origin_of(&url), None);
    }

    #[test]
    fn test_same_origin_is_crawlable() {
        let visited = HashSet::new();
        assert!(filter().is_crawlable("https://example.com/about", &visited));
        assert!(filter().is_crawlable("https://example.com/", &visited));
    }

    #[test]
    fn test_other_origins_rejected() {
        let visited = HashSet::new();
        let f = filter();
        assert!(!f.is_crawlable("https://other.com/about", &visited));
        assert!(!f.is_crawlable("http://example.com/about", &visited));
        assert!(!f.is_crawlable("https://sub.example.com/about", &visited));
        assert!(!f.is_crawlable("https://example.com.evil.net/", &visited));
        assert!(!f.is_crawlable("https://example.com:8443/about", &visited));
    }

    #[test]
    fn test_skipped_extensions_case_insensitive() {
        let visited = HashSet::new();
        let f = filter();
        assert!(!f.is_crawlable("https://example.com/files/report.pdf", &visited));
        assert!(!f.is_crawlable("https://example.com/img/Logo.PNG", &visited));
        assert!(!f.is_crawlable("https://example.com/data.XLSX", &visited));
        assert!(f.is_crawlable("https://example.com/pdf-guide", &visited));
    }

    #[test]
    fn test_visited_rejected() {
        let mut visited = HashSet::new();
        visited.insert("https://example.com/about".to_string());
        assert!(!filter().is_crawlable("https://example.com/about", &visited));
        assert!(filter().is_crawlable("https://example.com/about/", &visited));
    }

    #[test]
    fn test_special_schemes_rejected() {
        let visited = HashSet::new();
        let f = filter();
        assert!(!f.is_crawlable("mailto:me@example.com", &visited));
        assert!(!f.is_crawlable("tel:+15555555555", &visited));
        assert!(!f.is_crawlable("javascript:void(0)", &visited));
        assert!(!f.is_crawlable("#section", &visited));
        assert!(!f.is_crawlable("not a url", &visited));
    }

    #[test]
    fn test_custom_extensions() {
        let seed = Url::parse("https://example.com/").unwrap();
        let f = ScopeFilter::new(&seed, &[".ZIP".to_string()]).unwrap();
        let visited = HashSet::new();
        assert!(!f.is_crawlable("https://example.com/a.zip", &visited));
        assert!(f.is_crawlable("https://example.com/a.pdf", &visited));
    }
}
