//! Direct PDF download tests
//!
//! These tests use wiremock to serve PDF bytes over HTTP.

use site_pdf::config::DEFAULT_USER_AGENT;
use site_pdf::crawlers::{HttpFetcher, PdfFetcher};
use site_pdf::CrawlError;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(10)).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;
    let body = b"%PDF-1.4 test document".to_vec();

    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.clone())
                .insert_header("content-type", "application/pdf"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/files/report.pdf", mock_server.uri());
    let bytes = fetcher().fetch(&url).await.unwrap();

    assert_eq!(bytes, body);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing.pdf", mock_server.uri());
    let result = fetcher().fetch(&url).await;

    assert!(matches!(result, Err(CrawlError::Http(_))));
}

#[tokio::test]
async fn test_server_error_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = format!("{}/broken.pdf", mock_server.uri());
    assert!(fetcher().fetch(&url).await.is_err());
}
