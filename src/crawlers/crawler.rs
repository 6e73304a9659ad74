use crate::error::CrawlError;
use std::time::Duration;

/// A single browsing session that renders pages one at a time.
///
/// Only one page is ever loaded at once; the crawler serializes all
/// navigation through the session it is given.
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    /// Navigate to `url` and print the loaded page to PDF bytes.
    ///
    /// Navigation taking longer than `timeout` is an error.
    async fn render(&mut self, url: &str, timeout: Duration) -> Result<Vec<u8>, CrawlError>;

    /// Absolute targets of every anchor on the currently loaded page, in
    /// document order, duplicates included
    async fn extract_links(&mut self) -> Result<Vec<String>, CrawlError>;

    /// End the session
    async fn close(self) -> Result<(), CrawlError>
    where
        Self: Sized;
}

/// Downloads a PDF resource directly, bypassing the browser
#[allow(async_fn_in_trait)]
pub trait PdfFetcher {
    /// Fetch the raw bytes at `url`; a non-2xx response is an error
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CrawlError>;
}
