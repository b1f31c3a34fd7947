//! Core extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ScrapeError;
use pagelens_domain::content::{ContentSummary, FORM_MARKER};
use pagelens_domain::traits::ContentSource;
use scraper::{Html, Selector};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use url::Url;

/// Fetches a URL and summarizes its visible content.
///
/// The fetch is a single blocking GET presenting a browser user agent.
/// Extraction itself never touches the network: [`summarize_html`] is a
/// pure function over the returned markup.
pub struct ContentExtractor {
    client: reqwest::blocking::Client,
    config: ExtractorConfig,
}

impl ContentExtractor {
    /// Create a new extractor from a configuration.
    pub fn new(config: ExtractorConfig) -> Result<Self, ScrapeError> {
        config.validate().map_err(ScrapeError::Config)?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ScrapeError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create an extractor with default settings.
    pub fn with_defaults() -> Result<Self, ScrapeError> {
        Self::new(ExtractorConfig::default())
    }

    fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ScrapeError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        response.text().map_err(|e| ScrapeError::Body(e.to_string()))
    }
}

impl ContentSource for ContentExtractor {
    type Error = ScrapeError;

    fn extract(&self, url: &str) -> Result<ContentSummary, Self::Error> {
        let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ScrapeError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        info!("Fetching {}", parsed);
        let html = self.fetch(&parsed)?;
        debug!("Fetched {} bytes of markup", html.len());

        Ok(summarize_html(&html, self.config.max_paragraphs))
    }
}

/// Derive a [`ContentSummary`] from raw markup.
///
/// Selects title, `h1`-`h3` headings, buttons, forms, anchors, and
/// paragraphs in document order. All text is whitespace-trimmed;
/// paragraphs are truncated to `max_paragraphs` after collection, so the
/// first ten in document order are kept even when some are empty.
pub fn summarize_html(html: &str, max_paragraphs: usize) -> ContentSummary {
    let doc = Html::parse_document(html);

    // Static selectors, known valid.
    let title_sel = Selector::parse("title").unwrap();
    let heading_sel = Selector::parse("h1, h2, h3").unwrap();
    let button_sel = Selector::parse("button").unwrap();
    let form_sel = Selector::parse("form").unwrap();
    let link_sel = Selector::parse("a").unwrap();
    let paragraph_sel = Selector::parse("p").unwrap();

    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default();

    let headings = doc.select(&heading_sel).map(|el| element_text(&el)).collect();

    let buttons = doc.select(&button_sel).map(|el| element_text(&el)).collect();

    // One opaque marker per form; form internals are not inspected.
    let forms = doc
        .select(&form_sel)
        .map(|_| FORM_MARKER.to_string())
        .collect();

    let links = doc
        .select(&link_sel)
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
        .collect();

    let paragraphs: Vec<String> = doc
        .select(&paragraph_sel)
        .map(|el| element_text(&el))
        .take(max_paragraphs)
        .collect();

    ContentSummary {
        title,
        headings,
        buttons,
        forms,
        links,
        paragraphs,
    }
}

fn element_text(el: &scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Deterministic content source for testing.
///
/// Returns a preset summary (or a preset failure) without touching the
/// network, and counts how many times it was asked to extract.
#[derive(Debug, Clone)]
pub struct StaticSource {
    summary: Option<ContentSummary>,
    call_count: Arc<Mutex<usize>>,
}

impl StaticSource {
    /// Source that always yields the given summary.
    pub fn new(summary: ContentSummary) -> Self {
        Self {
            summary: Some(summary),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Source that always fails, simulating an unreachable page.
    pub fn failing() -> Self {
        Self {
            summary: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times extract was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl ContentSource for StaticSource {
    type Error = ScrapeError;

    fn extract(&self, _url: &str) -> Result<ContentSummary, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        match &self.summary {
            Some(summary) => Ok(summary.clone()),
            None => Err(ScrapeError::Fetch("simulated network failure".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
  <head><title>  Demo Site </title></head>
  <body>
    <h1> Welcome </h1>
    <h2>Features</h2>
    <h3>Pricing</h3>
    <button> Sign up </button>
    <button>Log in</button>
    <form action="/subscribe"><input name="email"></form>
    <a href="/docs"> Docs </a>
    <a href="/empty"><img src="x.png"></a>
    <p> Hello there. </p>
    <p>Second paragraph.</p>
  </body>
</html>"#;

    #[test]
    fn test_summarize_basic_page() {
        let summary = summarize_html(PAGE, 10);

        assert_eq!(summary.title, "Demo Site");
        assert_eq!(summary.headings, vec!["Welcome", "Features", "Pricing"]);
        assert_eq!(summary.buttons, vec!["Sign up", "Log in"]);
        assert_eq!(summary.forms, vec![FORM_MARKER]);
        assert_eq!(summary.links, vec!["Docs"]);
        assert_eq!(summary.paragraphs, vec!["Hello there.", "Second paragraph."]);
    }

    #[test]
    fn test_headings_preserve_document_order() {
        let html = "<h3>c</h3><h1>a</h1><h2>b</h2>";
        let summary = summarize_html(html, 10);
        assert_eq!(summary.headings, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_paragraphs_truncated_to_first_ten() {
        let html: String = (0..25).map(|i| format!("<p>para {}</p>", i)).collect();
        let summary = summarize_html(&html, 10);

        assert_eq!(summary.paragraphs.len(), 10);
        assert_eq!(summary.paragraphs[0], "para 0");
        assert_eq!(summary.paragraphs[9], "para 9");
    }

    #[test]
    fn test_empty_page() {
        let summary = summarize_html("<html><body></body></html>", 10);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_empty_anchor_text_skipped() {
        let html = r#"<a href="/a"></a><a href="/b">kept</a>"#;
        let summary = summarize_html(html, 10);
        assert_eq!(summary.links, vec!["kept"]);
    }

    #[test]
    fn test_form_contents_not_inspected() {
        let html = r#"<form><input name="a"></form><form></form>"#;
        let summary = summarize_html(html, 10);
        assert_eq!(summary.forms, vec![FORM_MARKER, FORM_MARKER]);
    }

    #[test]
    fn test_extractor_rejects_bad_scheme() {
        let extractor = ContentExtractor::with_defaults().unwrap();
        let result = extractor.extract("ftp://example.com");
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[test]
    fn test_extractor_rejects_relative_url() {
        let extractor = ContentExtractor::with_defaults().unwrap();
        let result = extractor.extract("not-a-url");
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[test]
    fn test_static_source_counts_calls() {
        let source = StaticSource::new(ContentSummary::default());
        assert_eq!(source.call_count(), 0);
        source.extract("https://example.com").unwrap();
        source.extract("https://example.com").unwrap();
        assert_eq!(source.call_count(), 2);
    }

    #[test]
    fn test_static_source_failure() {
        let source = StaticSource::failing();
        let result = source.extract("https://example.com");
        assert!(matches!(result, Err(ScrapeError::Fetch(_))));
        assert_eq!(source.call_count(), 1);
    }
}
