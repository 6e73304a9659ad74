use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:/]+").expect("static regex is valid"));

/// File name for a rendered page: every run of `:` and `/` becomes one `_`.
///
/// `https://example.com/a/b` becomes `https_example.com_a_b.pdf`. Flat but not
/// collision-free.
pub fn page_file_name(url: &str) -> String {
    format!("{}.pdf", SEPARATOR_RUN.replace_all(url, "_"))
}

/// File name for a directly downloaded PDF: the last path segment of its URL
pub fn download_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "download.pdf".to_string())
}
