use crate::error::CrawlError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// User agent sent by the browser session and by direct PDF downloads
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/94.0.4606.81 Safari/537.36";

/// Default crawl depth when none (or an unparseable one) is given
pub const DEFAULT_DEPTH: usize = 2;

/// Name of the merged output inside the output directory
pub const COMBINED_FILE_NAME: &str = "combined_document.pdf";

/// Settings for the browsing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// User agent for the browser and for direct downloads
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Upper bound on navigating to a single page
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_headless() -> bool {
    true
}

fn default_render_timeout_secs() -> u64 {
    30
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
            headless: default_headless(),
            render_timeout_secs: default_render_timeout_secs(),
        }
    }
}

impl BrowserConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CrawlError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| CrawlError::io(path, e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CrawlError::io(path, e))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CrawlError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

/// Parameters of one traversal, shared read-only by the whole crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Hostname every followed link must match exactly
    pub base_domain: String,
    /// Directory receiving every artifact
    pub output_dir: PathBuf,
    /// Number of hops allowed below the start URL
    pub depth: usize,
    /// Only collect direct PDF resources; never render pages
    pub pdf_only: bool,
    /// Also download PDF links found while rendering pages
    pub download_pdfs: bool,
    /// Navigation timeout per page
    pub render_timeout: Duration,
}

/// Complete configuration for one run of the tool
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: Url,
    pub output_dir: PathBuf,
    pub depth: usize,
    pub pdf_only: bool,
    pub download_pdfs: bool,
    /// Merge all artifacts into one document after the crawl
    pub single_pdf: bool,
    pub browser: BrowserConfig,
}

impl CrawlConfig {
    /// Create a configuration with default values for the given start URL.
    ///
    /// The output directory defaults to the start URL's hostname.
    pub fn new(start_url: &str) -> Result<Self, CrawlError> {
        let start_url = Url::parse(start_url).map_err(|source| CrawlError::InvalidStartUrl {
            url: start_url.to_string(),
            source,
        })?;
        let host = start_url
            .host_str()
            .ok_or_else(|| CrawlError::MissingHost(start_url.to_string()))?
            .to_string();

        Ok(Self {
            start_url,
            output_dir: PathBuf::from(host),
            depth: DEFAULT_DEPTH,
            pdf_only: false,
            download_pdfs: false,
            single_pdf: false,
            browser: BrowserConfig::default(),
        })
    }

    /// Hostname of the start URL, which scopes the crawl
    pub fn base_domain(&self) -> &str {
        self.start_url.host_str().unwrap_or_default()
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_dir.join(COMBINED_FILE_NAME)
    }

    /// Traversal parameters derived from this configuration
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            base_domain: self.base_domain().to_string(),
            output_dir: self.output_dir.clone(),
            depth: self.depth,
            pdf_only: self.pdf_only,
            download_pdfs: self.download_pdfs,
            render_timeout: self.browser.render_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_hostname_for_output_dir() {
        let config = CrawlConfig::new("https://example.com:8443/docs/index.html").unwrap();
        assert_eq!(config.base_domain(), "example.com");
        assert_eq!(config.output_dir, PathBuf::from("example.com"));
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(
            config.combined_path(),
            PathBuf::from("example.com").join("combined_document.pdf")
        );
    }

    #[test]
    fn test_new_rejects_bad_urls() {
        assert!(matches!(
            CrawlConfig::new("not a url"),
            Err(CrawlError::InvalidStartUrl { .. })
        ));
        assert!(matches!(
            CrawlConfig::new("data:text/plain,hello"),
            Err(CrawlError::MissingHost(_))
        ));
    }

    #[test]
    fn test_browser_config_partial_json() {
        let config = BrowserConfig::from_json(r#"{"webdriver_url": "http://localhost:9515"}"#)
            .unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.headless);
        assert_eq!(config.render_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_browser_config_invalid_json() {
        assert!(matches!(
            BrowserConfig::from_json("{"),
            Err(CrawlError::Config(_))
        ));
    }

    #[test]
    fn test_crawl_options_mirror_config() {
        let mut config = CrawlConfig::new("https://example.com").unwrap();
        config.pdf_only = true;
        config.depth = 4;
        config.browser.render_timeout_secs = 5;

        let options = config.crawl_options();
        assert_eq!(options.base_domain, "example.com");
        assert_eq!(options.depth, 4);
        assert!(options.pdf_only);
        assert!(!options.download_pdfs);
        assert_eq!(options.render_timeout, Duration::from_secs(5));
    }
}
