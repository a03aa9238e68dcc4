//! URL validity filter.
//!
//! A crawl is bounded to URLs sharing the seed URL's literal string prefix.
//! This is deliberately not a host/path-aware containment test: query
//! strings and trailing-slash differences change the result, and no
//! normalization (case-folding, default-port stripping) is performed.

use url::Url;

/// Decides whether a discovered URL is in scope for a crawl.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    /// The seed URL's string form, used verbatim as a prefix.
    origin_prefix: String,
}

impl CrawlScope {
    /// Create a scope rooted at the seed URL.
    pub fn new(seed: &Url) -> Self {
        Self {
            origin_prefix: seed.to_string(),
        }
    }

    /// A URL is valid iff it has a host and starts with the origin prefix.
    /// (A parsed [`Url`] always carries a non-empty scheme.)
    pub fn is_valid(&self, url: &Url) -> bool {
        url.has_host() && url.as_str().starts_with(&self.origin_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_for(seed: &str) -> CrawlScope {
        CrawlScope::new(&Url::parse(seed).unwrap())
    }

    #[test]
    fn same_prefix_in_scope() {
        let scope = scope_for("https://example.com/docs");
        let url = Url::parse("https://example.com/docs/page2").unwrap();
        assert!(scope.is_valid(&url));
    }

    #[test]
    fn other_host_out_of_scope() {
        let scope = scope_for("https://example.com/docs");
        let url = Url::parse("https://other.example.com/x").unwrap();
        assert!(!scope.is_valid(&url));
    }

    #[test]
    fn parent_path_out_of_scope() {
        let scope = scope_for("https://example.com/docs");
        let url = Url::parse("https://example.com/blog/post").unwrap();
        assert!(!scope.is_valid(&url));
    }

    #[test]
    fn prefix_test_is_literal() {
        // A sibling path that happens to share the string prefix passes.
        let scope = scope_for("https://example.com/docs");
        let url = Url::parse("https://example.com/docs-v2/page").unwrap();
        assert!(scope.is_valid(&url));
    }

    #[test]
    fn query_string_on_seed_changes_result() {
        let scope = scope_for("https://example.com/docs?lang=en");
        let url = Url::parse("https://example.com/docs/page").unwrap();
        assert!(!scope.is_valid(&url));
    }

    #[test]
    fn hostless_url_invalid() {
        let scope = scope_for("https://example.com/");
        let url = Url::parse("mailto:user@example.com").unwrap();
        assert!(!scope.is_valid(&url));
    }

    #[test]
    fn seed_itself_is_valid() {
        let seed = Url::parse("https://example.com/docs/").unwrap();
        let scope = CrawlScope::new(&seed);
        assert!(scope.is_valid(&seed));
    }
}
