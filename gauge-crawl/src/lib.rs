//! Managed crawl-API extraction strategy.
//!
//! Talks to a Firecrawl-style `v1/scrape` endpoint and normalizes its
//! markdown/html/links payload into the same [`ExtractionRecord`] shape the
//! direct HTML extractor produces. The attempt loop with exponential backoff
//! lives here — retry policy for the managed service is this strategy's own
//! concern, so the underlying HTTP client runs with retries disabled.

use async_trait::async_trait;
use gauge_common::GaugeError;
use gauge_extract::Extractor;
use gauge_http::{Auth, HttpClient, RequestOpts};
use gauge_score::ExtractionRecord;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

const CRAWL_API_BASE: &str = "https://api.firecrawl.dev/";
const CONTENT_CAP_CHARS: usize = 3000;
const MAX_HEADINGS: usize = 5;

/// Extraction strategy backed by the managed crawling service.
pub struct CrawlApiExtractor {
    http: HttpClient,
    api_key: Option<String>,
    max_attempts: usize,
    timeout: Duration,
    use_proxy: bool,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 3],
    /// Milliseconds, per the service API.
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    links: Option<Vec<String>>,
    #[serde(default)]
    metadata: Option<ScrapeMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeMetadata {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "ogDescription")]
    og_description: Option<String>,
}

impl CrawlApiExtractor {
    /// `base_url` overrides the hosted endpoint (self-hosted deployments,
    /// tests); `None` uses the public API.
    pub fn new(
        api_key: Option<String>,
        max_attempts: usize,
        timeout: Duration,
        use_proxy: bool,
        base_url: Option<&str>,
    ) -> gauge_common::Result<Self> {
        let http = HttpClient::new(base_url.unwrap_or(CRAWL_API_BASE))
            .map_err(|e| GaugeError::Extractor(format!("http client init failed: {e}")))?
            .with_timeout(timeout + Duration::from_secs(5));

        Ok(Self {
            http,
            api_key,
            max_attempts: max_attempts.max(1),
            timeout,
            use_proxy,
        })
    }

    async fn scrape_once(&self, url: &Url, api_key: &str) -> Result<ScrapeData, String> {
        let req = ScrapeRequest {
            url: url.as_str(),
            formats: ["markdown", "html", "links"],
            timeout: self.timeout.as_millis() as u64,
            proxy: self.use_proxy.then_some("basic"),
        };

        let resp: ScrapeResponse = self
            .http
            .post_json(
                "v1/scrape",
                &req,
                RequestOpts {
                    auth: Some(Auth::Bearer(api_key)),
                    timeout: Some(self.timeout + Duration::from_secs(5)),
                    // the attempt loop owns retries
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| e.to_string())?;

        match resp.data {
            Some(data) if resp.success => Ok(data),
            _ => Err("service returned no scrape data".to_string()),
        }
    }
}

#[async_trait]
impl Extractor for CrawlApiExtractor {
    fn name(&self) -> &'static str {
        "crawl-api"
    }

    async fn extract(&self, url: &Url) -> ExtractionRecord {
        let Some(api_key) = self.api_key.as_deref() else {
            return ExtractionRecord::failed("crawl api error: api key not configured");
        };

        let mut attempt = 0usize;
        loop {
            attempt += 1;
            match self.scrape_once(url, api_key).await {
                Ok(data) => {
                    tracing::debug!(target: "extract.crawl", url = %url, attempt, "scrape succeeded");
                    return normalize(data);
                }
                Err(message) => {
                    if attempt >= self.max_attempts {
                        tracing::warn!(
                            target: "extract.crawl",
                            url = %url,
                            attempt,
                            message = %message,
                            "scrape failed, budget exhausted"
                        );
                        return ExtractionRecord::failed(format!("crawl api error: {message}"));
                    }
                    let delay = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(
                        target: "extract.crawl",
                        url = %url,
                        attempt,
                        backoff_secs = delay.as_secs(),
                        message = %message,
                        "scrape failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Map the service payload onto the shared record shape.
fn normalize(data: ScrapeData) -> ExtractionRecord {
    let markdown = data.markdown.unwrap_or_default();
    let metadata = data.metadata.unwrap_or_default();

    let headings = headings_from_markdown(&markdown);
    let word_count = markdown.split_whitespace().count() as u32;

    let (image_count, images_with_alt) = data
        .html
        .as_deref()
        .map(count_images)
        .unwrap_or((0, 0));

    ExtractionRecord {
        title: metadata.title.filter(|t| !t.is_empty()),
        meta_description: metadata
            .description
            .or(metadata.og_description)
            .filter(|d| !d.is_empty()),
        headings,
        content: markdown.chars().take(CONTENT_CAP_CHARS).collect(),
        word_count: Some(word_count),
        link_count: data.links.map_or(0, |links| links.len() as u32),
        image_count,
        images_with_alt,
        execution_time: None,
        error: None,
    }
}

/// Leading-`#` lines become headings, hash markers stripped, capped.
fn headings_from_markdown(markdown: &str) -> Vec<String> {
    let marker = Regex::new(r"^#+\s").expect("static regex");
    let prefix = Regex::new(r"^#+\s*").expect("static regex");

    let mut headings = Vec::new();
    for line in markdown.lines() {
        if marker.is_match(line) {
            headings.push(prefix.replace(line, "").trim().to_string());
            if headings.len() >= MAX_HEADINGS {
                break;
            }
        }
    }
    headings
}

fn count_images(html: &str) -> (u32, u32) {
    let doc = Html::parse_document(html);
    let img = Selector::parse("img").expect("static selector");

    let mut image_count = 0u32;
    let mut images_with_alt = 0u32;
    for el in doc.select(&img) {
        image_count += 1;
        if el.value().attr("alt").is_some_and(|alt| !alt.is_empty()) {
            images_with_alt += 1;
        }
    }
    (image_count, images_with_alt)
}
