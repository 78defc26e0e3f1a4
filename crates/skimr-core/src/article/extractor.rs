use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

use crate::config::ExtractorConfig;
use crate::text::truncate_chars;
use crate::{Error, Result};

/// Titles longer than this are cut
pub const MAX_TITLE_CHARS: usize = 100;

const BROWSER_USER_AGENT: &str = concat!("skimr/", env!("CARGO_PKG_VERSION"));

/// Article text pulled from a web page
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArticle {
    pub title: String,
    pub body_text: String,
    pub source_url: String,
}

/// Fetches a URL and returns its readable text
#[async_trait::async_trait]
pub trait ArticleExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle>;
}

/// Absolute http(s) URL with a host
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Readable title built from the URL path: `https://site.com/big-news-today` → `Big News Today`.
///
/// Falls back to the host when the URL has no path.
pub fn title_from_url(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let path = match without_scheme.split_once('/') {
        Some((_, path)) => path,
        None => "",
    };

    let title = path
        .replace('-', " ")
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ");

    let title = if title.is_empty() {
        without_scheme.trim_end_matches('/').to_string()
    } else {
        title
    };

    truncate_chars(&title, MAX_TITLE_CHARS).to_string()
}

fn html_title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid"))
}

/// Contents of the page's `<title>` element, whitespace-collapsed
fn extract_html_title(html: &str) -> Option<String> {
    let raw = html_title_regex().captures(html)?.get(1)?.as_str();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        None
    } else {
        Some(truncate_chars(&title, MAX_TITLE_CHARS).to_string())
    }
}

/// Convert HTML content to plain text
fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 120).unwrap_or_else(|_| html.to_string())
}

/// reqwest + html2text article extractor
pub struct HttpArticleExtractor {
    client: Client,
    max_body_bytes: usize,
}

impl HttpArticleExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let client = Self::build_client(config.request_timeout_secs, &config.proxy_url)?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for article fetching");
        }

        builder.build().map_err(Error::Http)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers
    }
}

#[async_trait::async_trait]
impl ArticleExtractor for HttpArticleExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
        let url = url.trim();
        if !is_valid_url(url) {
            return Err(Error::Extraction(format!("Invalid URL format: {}", url)));
        }

        tracing::info!("Fetching article from: {}", url);

        let response = self
            .client
            .get(url)
            .headers(Self::build_headers())
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to download content from URL: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Extraction(format!(
                "Failed to download content from URL (HTTP {})",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to download content from URL: {}", e)))?;

        if body.len() > self.max_body_bytes {
            return Err(Error::Extraction(format!(
                "Page too large ({} bytes, limit {})",
                body.len(),
                self.max_body_bytes
            )));
        }

        let html = String::from_utf8_lossy(&body);
        let body_text = html_to_text(&html).trim().to_string();
        if body_text.is_empty() {
            return Err(Error::Extraction("No content extracted from URL".to_string()));
        }

        let title = extract_html_title(&html).unwrap_or_else(|| title_from_url(url));
        tracing::debug!(title = %title, chars = body_text.chars().count(), "Article extracted");

        Ok(ExtractedArticle {
            title,
            body_text,
            source_url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/news"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url("example.com/news"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_title_from_url_path() {
        assert_eq!(
            title_from_url("https://news.example.com/big-NEWS-today"),
            "Big News Today"
        );
        assert_eq!(title_from_url("http://example.com/world/rain-returns"), "World/rain Returns");
    }

    #[test]
    fn test_title_from_url_without_path_uses_host() {
        assert_eq!(title_from_url("https://example.com"), "example.com");
        assert_eq!(title_from_url("https://example.com/"), "example.com");
    }

    #[test]
    fn test_title_is_limited() {
        let url = format!("https://example.com/{}", "word-".repeat(60));
        assert_eq!(title_from_url(&url).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_extract_html_title() {
        let html = "<html><head><TITLE>\n  Rain  returns\n</TITLE></head><body></body></html>";
        assert_eq!(extract_html_title(html).as_deref(), Some("Rain returns"));
        assert_eq!(extract_html_title("<title> </title>"), None);
        assert_eq!(extract_html_title("<p>no title</p>"), None);
    }

    #[test]
    fn test_html_to_text_keeps_words() {
        let text = html_to_text("<html><body><h1>Heading</h1><p>Body text here.</p></body></html>");
        assert!(text.contains("Heading"));
        assert!(text.contains("Body text here."));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_without_fetching() {
        let extractor = HttpArticleExtractor::new(&ExtractorConfig::default()).unwrap();
        let err = extractor.extract("not-a-url").await.unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
