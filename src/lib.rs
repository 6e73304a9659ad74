// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod merge;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{BrowserConfig, CrawlConfig, CrawlOptions};
pub use crawlers::{BrowserSession, Crawler, HttpFetcher, PdfFetcher, WebDriverSession, crawl};
pub use error::CrawlError;
pub use results::{Artifact, ArtifactKind, CrawlReport};

use std::time::{Duration, Instant};

/// Upper bound on a single direct PDF download
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs a complete crawl: prepares the output directory, opens the browser
/// session, crawls, closes the session and merges the artifacts if requested.
pub async fn run(config: &CrawlConfig) -> Result<CrawlReport, CrawlError> {
    ::log::info!("Starting crawl of {}", config.start_url);

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| CrawlError::io(&config.output_dir, e))?;

    let fetcher = HttpFetcher::new(&config.browser.user_agent, DOWNLOAD_TIMEOUT)?;
    let mut session = WebDriverSession::open(&config.browser).await?;

    let report = run_with(&mut session, &fetcher, config).await;

    // the session is released on every path, including a failed crawl
    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    report
}

/// Crawls with the given collaborators and merges the artifacts if requested.
///
/// Does not open or close `session`.
pub async fn run_with<S: BrowserSession, F: PdfFetcher>(
    session: &mut S,
    fetcher: &F,
    config: &CrawlConfig,
) -> Result<CrawlReport, CrawlError> {
    let start_time = Instant::now();
    let options = config.crawl_options();

    let mut crawler = Crawler::new(session, fetcher, &options);
    let artifacts = crawler
        .crawl(config.start_url.as_str(), options.depth)
        .await?;
    let visited = crawler.visited().len();

    ::log::info!(
        "Crawling complete - {} artifacts from {} URLs in {:.2} seconds",
        artifacts.len(),
        visited,
        start_time.elapsed().as_secs_f64()
    );

    let combined = if config.single_pdf && !artifacts.is_empty() {
        let paths = artifacts.iter().map(|a| a.path.as_path()).collect::<Vec<_>>();
        Some(merge::merge_pdfs(&paths, &config.combined_path())?)
    } else {
        if config.single_pdf {
            ::log::info!("No artifacts produced, skipping merge");
        } else {
            ::log::info!("Saved each page or downloaded PDF as a separate file.");
        }
        None
    };

    Ok(CrawlReport {
        artifacts,
        visited,
        combined,
    })
}
