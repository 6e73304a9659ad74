use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while crawling, rendering, downloading or merging
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The start URL could not be parsed
    #[error("invalid start URL {url}: {source}")]
    InvalidStartUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The start URL parsed but has no hostname to scope the crawl to
    #[error("start URL {0} has no hostname")]
    MissingHost(String),

    /// Filesystem failure on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No WebDriver server accepted a new session
    #[error("failed to open WebDriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed on an open session
    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// Print settings were rejected before reaching the browser
    #[error("invalid print settings: {0}")]
    Print(String),

    /// Navigation did not finish within the page timeout
    #[error("timed out after {timeout:?} loading {url}")]
    Timeout { url: String, timeout: Duration },

    /// Direct download failed (network error or non-2xx status)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// PDF loading or writing failed while merging
    #[error("failed to merge PDFs: {0}")]
    Merge(#[from] lopdf::Error),

    /// None of the merge inputs contained a page
    #[error("no pages to merge into {0}")]
    NothingToMerge(PathBuf),

    /// Browser configuration file was not valid JSON
    #[error("invalid browser configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl CrawlError {
    /// Wraps an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
