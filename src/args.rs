use clap::Parser;
use site_pdf::config::{BrowserConfig, DEFAULT_DEPTH};
use site_pdf::{CrawlConfig, CrawlError};
use std::convert::Infallible;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-pdf")]
#[command(about = "Crawl a website and save pages as PDFs or download linked PDFs")]
#[command(version)]
pub struct Args {
    /// The starting URL to crawl; its hostname scopes the crawl
    pub url: String,

    /// Depth of crawling (falls back to 2 if not a number)
    #[arg(long, value_parser = parse_depth, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Only download PDF files and ignore HTML pages
    #[arg(long)]
    pub pdf_only: bool,

    /// Download any PDF files linked on pages
    #[arg(long)]
    pub download_pdfs: bool,

    /// Combine all artifacts into a single PDF
    #[arg(long)]
    pub single_pdf: bool,

    /// Output directory (defaults to the start URL's hostname)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON file with browser settings
    #[arg(long)]
    pub browser_config: Option<PathBuf>,

    /// URL for the WebDriver instance
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Per-page navigation timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User agent for the browser and for direct downloads
    #[arg(long)]
    pub user_agent: Option<String>,
}

fn parse_depth(value: &str) -> Result<usize, Infallible> {
    Ok(value.trim().parse().unwrap_or(DEFAULT_DEPTH))
}

impl Args {
    /// Builds the run configuration; explicit flags override the browser config file
    pub fn into_config(self) -> Result<CrawlConfig, CrawlError> {
        let mut config = CrawlConfig::new(&self.url)?;
        config.depth = self.depth;
        config.pdf_only = self.pdf_only;
        config.download_pdfs = self.download_pdfs;
        config.single_pdf = self.single_pdf;

        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }

        config.browser = match &self.browser_config {
            Some(path) => BrowserConfig::from_file(path)?,
            None => BrowserConfig::default(),
        };
        if let Some(url) = self.webdriver_url.filter(|u| !u.is_empty()) {
            config.browser.webdriver_url = url;
        }
        if let Some(secs) = self.timeout {
            config.browser.render_timeout_secs = secs;
        }
        if let Some(ua) = self.user_agent {
            config.browser.user_agent = ua;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["site-pdf", "https://example.com"]);
        assert_eq!(args.depth, 2);
        assert!(!args.pdf_only);
        assert!(!args.download_pdfs);
        assert!(!args.single_pdf);
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "site-pdf",
            "https://example.com",
            "--depth=3",
            "--pdf-only",
            "--download-pdfs",
            "--single-pdf",
        ]);
        assert_eq!(args.depth, 3);
        assert!(args.pdf_only);
        assert!(args.download_pdfs);
        assert!(args.single_pdf);
    }

    #[test]
    fn test_unparseable_depth_falls_back() {
        assert_eq!(parse(&["site-pdf", "https://example.com", "--depth=abc"]).depth, 2);
        assert_eq!(parse(&["site-pdf", "https://example.com", "--depth=-1"]).depth, 2);
        assert_eq!(parse(&["site-pdf", "https://example.com", "--depth=0"]).depth, 0);
    }

    #[test]
    fn test_missing_url_is_an_error() {
        assert!(Args::try_parse_from(["site-pdf"]).is_err());
        assert!(Args::try_parse_from(["site-pdf", "--depth=1"]).is_err());
    }

    #[test]
    fn test_into_config() {
        let config = parse(&[
            "site-pdf",
            "https://docs.example.com/guide/",
            "--depth=1",
            "--single-pdf",
            "--timeout",
            "10",
            "--webdriver-url",
            "http://localhost:9515",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.base_domain(), "docs.example.com");
        assert_eq!(config.output_dir, PathBuf::from("docs.example.com"));
        assert_eq!(config.depth, 1);
        assert!(config.single_pdf);
        assert_eq!(config.browser.render_timeout_secs, 10);
        assert_eq!(config.browser.webdriver_url, "http://localhost:9515");
    }

    #[test]
    fn test_output_dir_override() {
        let config = parse(&["site-pdf", "https://example.com", "--output-dir", "out/pdfs"])
            .into_config()
            .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out/pdfs"));
        assert_eq!(config.base_domain(), "example.com");
    }
}
