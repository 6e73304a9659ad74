pub mod html;

use url::Url;

/// How a crawled URL is turned into an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// A document rendered by the browser and searched for links
    Page,
    /// A raw PDF file, downloaded as-is and never parsed for links
    Pdf,
}

impl ResourceType {
    /// Determines the resource type from the URL path.
    ///
    /// Query strings and fragments are ignored, so `/report.pdf?v=2` is a PDF.
    pub fn from_url(url: &Url) -> Self {
        if url.path().to_ascii_lowercase().ends_with(".pdf") {
            ::log::debug!("Classifying as PDF: {}", url);
            ResourceType::Pdf
        } else {
            ::log::debug!("Classifying as page: {}", url);
            ResourceType::Page
        }
    }
}
