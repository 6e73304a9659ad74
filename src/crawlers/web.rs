use crate::config::BrowserConfig;
use crate::crawlers::crawler::BrowserSession;
use crate::error::CrawlError;
use crate::parsers::html;
use fantoccini::wd::{Capabilities, PrintConfiguration};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Common local WebDriver endpoints tried when the configured one refuses
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Browser session driven over the WebDriver protocol
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Connects to the WebDriver instance, trying common local ports if the
    /// configured URL fails.
    pub async fn open(config: &BrowserConfig) -> Result<Self, CrawlError> {
        let capabilities = chrome_capabilities(config);

        let first_error = match connect(&config.webdriver_url, &capabilities).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            // fallback failures are not logged individually
            if let Ok(client) = connect(url, &capabilities).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(first_error.into())
    }
}

async fn connect(
    webdriver_url: &str,
    capabilities: &Capabilities,
) -> Result<Client, fantoccini::error::NewSessionError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder.connect(webdriver_url).await
}

fn chrome_capabilities(config: &BrowserConfig) -> Capabilities {
    let mut args = vec![format!("--user-agent={}", config.user_agent)];
    if config.headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }

    let mut capabilities = Capabilities::new();
    capabilities.insert("browserName".to_string(), json!("chrome"));
    capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    capabilities
}

/// A4 with backgrounds, as a browser's "save as PDF" would
fn print_settings() -> Result<PrintConfiguration, CrawlError> {
    PrintConfiguration::builder()
        .background(true)
        .build()
        .map_err(|e| CrawlError::Print(format!("{e:?}")))
}

impl BrowserSession for WebDriverSession {
    async fn render(&mut self, url: &str, limit: Duration) -> Result<Vec<u8>, CrawlError> {
        ::log::debug!("RENDER: {}", url);

        match timeout(limit, self.client.goto(url)).await {
            Ok(navigation) => navigation?,
            Err(_) => {
                return Err(CrawlError::Timeout {
                    url: url.to_string(),
                    timeout: limit,
                });
            }
        }

        let pdf = self.client.print(print_settings()?).await?;
        ::log::debug!("Printed {} ({} bytes)", url, pdf.len());
        Ok(pdf)
    }

    async fn extract_links(&mut self) -> Result<Vec<String>, CrawlError> {
        let source = self.client.source().await?;
        let base = self.client.current_url().await?;

        let links = html::extract_links(&source, &base);
        ::log::info!("Found {} links in {}", links.len(), base);
        Ok(links)
    }

    async fn close(self) -> Result<(), CrawlError> {
        self.client.close().await?;
        Ok(())
    }
}
