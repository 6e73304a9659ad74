pub mod crawler;
pub mod fetch;
pub mod traversal;
pub mod web;

pub use crawler::{BrowserSession, PdfFetcher};
pub use fetch::HttpFetcher;
pub use traversal::{CrawlTarget, Crawler, crawl};
pub use web::WebDriverSession;
