use std::path::PathBuf;

/// How an artifact was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A page printed to PDF by the browser
    RenderedPage,
    /// A PDF resource downloaded as-is
    DownloadedPdf,
}

/// A PDF file written during the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// URL the file was produced from
    pub url: String,

    /// Location of the file on disk
    pub path: PathBuf,

    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn new(url: String, path: PathBuf, kind: ArtifactKind) -> Self {
        Self { url, path, kind }
    }
}

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Artifacts in depth-first visitation order
    pub artifacts: Vec<Artifact>,

    /// Number of distinct URLs explored
    pub visited: usize,

    /// Merged document, if one was written
    pub combined: Option<PathBuf>,
}

impl CrawlReport {
    /// Paths of all artifacts, in order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.path.clone()).collect()
    }
}
