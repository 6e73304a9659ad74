use crate::config::CrawlOptions;
use crate::crawlers::crawler::{BrowserSession, PdfFetcher};
use crate::error::CrawlError;
use crate::filter::{UrlFilter, VisitedSet};
use crate::parsers::ResourceType;
use crate::results::{Artifact, ArtifactKind};
use crate::utils;
use url::Url;

/// A URL waiting to be explored, with the number of hops still allowed below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub depth: usize,
}

/// Depth-first crawler over one browsing session.
///
/// Owns the visited set for a single crawl; create a new `Crawler` per run.
pub struct Crawler<'a, S, F> {
    session: &'a mut S,
    fetcher: &'a F,
    options: &'a CrawlOptions,
    filter: UrlFilter,
    visited: VisitedSet,
}

impl<'a, S: BrowserSession, F: PdfFetcher> Crawler<'a, S, F> {
    pub fn new(session: &'a mut S, fetcher: &'a F, options: &'a CrawlOptions) -> Self {
        Self {
            session,
            fetcher,
            options,
            filter: UrlFilter::new(options.base_domain.clone()),
            visited: VisitedSet::new(),
        }
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Crawls from `start`, following links at most `depth` hops below it.
    ///
    /// A depth of zero produces nothing and leaves the visited set untouched.
    /// Artifacts come back in pre-order: a page's own artifact, then those of
    /// each of its links in link order. Render failures are logged and skipped;
    /// a failed direct PDF download aborts the crawl.
    pub async fn crawl(&mut self, start: &str, depth: usize) -> Result<Vec<Artifact>, CrawlError> {
        let mut artifacts = Vec::new();
        if depth == 0 {
            return Ok(artifacts);
        }

        // same serialized form as extracted links
        let start = Url::parse(start).map_or_else(|_| start.to_string(), String::from);
        let mut stack = vec![CrawlTarget { url: start, depth }];

        while let Some(target) = stack.pop() {
            // marked before any work so cycles and failures never revisit
            if !self.visited.insert(&target.url) {
                continue;
            }

            let children = self.visit(&target, &mut artifacts).await?;

            // reversed so the first link is popped next
            stack.extend(children.into_iter().rev().map(|url| CrawlTarget {
                url,
                depth: target.depth - 1,
            }));
        }

        Ok(artifacts)
    }

    /// Produces the artifact for one already-marked URL and returns the links
    /// to explore below it
    async fn visit(
        &mut self,
        target: &CrawlTarget,
        artifacts: &mut Vec<Artifact>,
    ) -> Result<Vec<String>, CrawlError> {
        let resource = match Url::parse(&target.url) {
            Ok(parsed) => Some((ResourceType::from_url(&parsed), parsed)),
            Err(_) => None,
        };

        match resource {
            Some((ResourceType::Pdf, parsed)) => {
                if self.options.pdf_only || self.options.download_pdfs {
                    artifacts.push(self.download(&target.url, &parsed).await?);
                } else {
                    ::log::debug!("Skipping PDF link (downloads disabled): {}", target.url);
                }
                Ok(Vec::new())
            }
            _ if self.options.pdf_only => {
                ::log::debug!("Skipping page in PDF-only mode: {}", target.url);
                Ok(Vec::new())
            }
            _ => {
                // a failed render still leaves the page's links to follow
                self.render_page(&target.url, artifacts).await;
                if target.depth == 0 {
                    return Ok(Vec::new());
                }
                Ok(self.discover_links(&target.url).await)
            }
        }
    }

    /// Renders `url` into the output directory, recording the artifact on success
    async fn render_page(&mut self, url: &str, artifacts: &mut Vec<Artifact>) {
        let path = self.options.output_dir.join(utils::page_file_name(url));

        let pdf = match self.session.render(url, self.options.render_timeout).await {
            Ok(pdf) => pdf,
            Err(e) => {
                ::log::error!("Error saving {} to PDF: {}", url, e);
                return;
            }
        };

        match tokio::fs::write(&path, &pdf).await {
            Ok(()) => {
                ::log::info!("Saved {} to {}", url, path.display());
                artifacts.push(Artifact::new(
                    url.to_string(),
                    path,
                    ArtifactKind::RenderedPage,
                ));
            }
            Err(e) => {
                ::log::error!("Error writing {}: {}", path.display(), e);
            }
        }
    }

    /// In-scope links of the page currently loaded in the session.
    ///
    /// A failed extraction counts as a page without links.
    async fn discover_links(&mut self, url: &str) -> Vec<String> {
        let links = match self.session.extract_links().await {
            Ok(links) => links,
            Err(e) => {
                ::log::warn!("Error extracting links from {}: {}", url, e);
                return Vec::new();
            }
        };

        links
            .into_iter()
            .filter(|link| self.filter.is_in_scope(link, &self.visited))
            .map(|link| Url::parse(&link).map_or(link, String::from))
            .collect()
    }

    async fn download(&self, url: &str, parsed: &Url) -> Result<Artifact, CrawlError> {
        let path = self
            .options
            .output_dir
            .join(utils::download_file_name(parsed));

        let bytes = self.fetcher.fetch(url).await?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| CrawlError::io(&path, e))?;

        ::log::info!("Downloaded PDF from {} to {}", url, path.display());
        Ok(Artifact::new(
            url.to_string(),
            path,
            ArtifactKind::DownloadedPdf,
        ))
    }
}

/// Crawls `url` with a fresh visited set and returns the artifacts produced
pub async fn crawl<S: BrowserSession, F: PdfFetcher>(
    session: &mut S,
    fetcher: &F,
    url: &str,
    options: &CrawlOptions,
) -> Result<Vec<Artifact>, CrawlError> {
    Crawler::new(session, fetcher, options)
        .crawl(url, options.depth)
        .await
}
