use std::collections::HashSet;
use url::Url;

/// URLs already explored during one crawl.
///
/// A URL enters the set before anything is done with it and is never removed,
/// so cyclic link graphs terminate.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Marks a URL as visited, returning false if it already was
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            ::log::trace!("Already visited: {}", url);
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Decides which discovered links belong to the crawl
#[derive(Debug, Clone)]
pub struct UrlFilter {
    base_domain: String,
}

impl UrlFilter {
    /// Create a filter scoped to one hostname
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into(),
        }
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// True iff `url` parses as an absolute URL, its hostname equals the base
    /// domain exactly, and it has not been visited yet.
    ///
    /// Never mutates `visited`; unparseable URLs are rejected rather than erred.
    pub fn is_in_scope(&self, url: &str, visited: &VisitedSet) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            ::log::debug!("URL filter rejected unparseable link: {}", url);
            return false;
        };

        if !self.is_in_domain_scope(&parsed) {
            ::log::debug!("URL filter rejected off-domain link: {}", url);
            return false;
        }

        !visited.contains(parsed.as_str())
    }

    /// Check if a URL's hostname is exactly the base domain
    fn is_in_domain_scope(&self, url: &Url) -> bool {
        url.host_str() == Some(self.base_domain.as_str())
    }
}
