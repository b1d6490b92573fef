//! Direct HTML extraction: fetch the page, parse the markup, normalize.

use async_trait::async_trait;
use gauge_common::GaugeError;
use gauge_http::{HttpClient, RequestOpts};
use gauge_score::ExtractionRecord;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use crate::Extractor;

/// Both extraction strategies cap the content blob at this many chars; the
/// scorer derives word counts before the cap is applied.
const CONTENT_CAP_CHARS: usize = 3000;
/// Records carry at most this many headings (the full set still feeds the
/// content assembly and word count).
const MAX_HEADINGS: usize = 5;

/// Extraction strategy that fetches the page directly and parses its markup
/// with `scraper`.
pub struct HtmlExtractor {
    http: HttpClient,
    headers: HeaderMap,
}

impl HtmlExtractor {
    pub fn new(timeout: Duration, user_agent: &str) -> gauge_common::Result<Self> {
        let http = HttpClient::unanchored()
            .map_err(|e| GaugeError::Extractor(format!("http client init failed: {e}")))?
            .with_timeout(timeout);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| GaugeError::Extractor(format!("invalid user agent: {e}")))?,
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        Ok(Self { http, headers })
    }
}

#[async_trait]
impl Extractor for HtmlExtractor {
    fn name(&self) -> &'static str {
        "html"
    }

    async fn extract(&self, url: &Url) -> ExtractionRecord {
        let opts = RequestOpts {
            headers: Some(self.headers.clone()),
            allow_absolute: true,
            ..Default::default()
        };

        let page = match self.http.get_text(url.as_str(), opts).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(target: "extract.html", url = %url, error = %e, "fetch failed");
                return ExtractionRecord::failed(format!("html extractor error: {e}"));
            }
        };

        let record = parse_page(&page);
        tracing::debug!(
            target: "extract.html",
            url = %url,
            page_bytes = page.len(),
            word_count = record.word_count,
            link_count = record.link_count,
            "page parsed"
        );
        record
    }
}

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector")
}

/// Normalize raw markup into an extraction record. Pure so it can be tested
/// against fixture pages without a server.
fn parse_page(page: &str) -> ExtractionRecord {
    let doc = Html::parse_document(page);

    let title = doc
        .select(&sel("title"))
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let meta_description = meta_content(&doc, r#"meta[name="description"]"#)
        .or_else(|| meta_content(&doc, r#"meta[property="og:description"]"#));

    let headings: Vec<String> = doc
        .select(&sel("h1, h2, h3"))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    let paragraphs: Vec<String> = doc
        .select(&sel("p"))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    // Content is the heading + paragraph text; the word count covers the
    // whole assembly even though the stored blob is capped.
    let content = headings
        .iter()
        .chain(paragraphs.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let word_count = content.split_whitespace().count() as u32;

    let link_count = doc
        .select(&sel("a[href]"))
        .filter(|el| {
            el.value()
                .attr("href")
                .is_some_and(|href| href.starts_with("http://") || href.starts_with("https://"))
        })
        .count() as u32;

    let mut image_count = 0u32;
    let mut images_with_alt = 0u32;
    for img in doc.select(&sel("img")) {
        image_count += 1;
        if img.value().attr("alt").is_some_and(|alt| !alt.is_empty()) {
            images_with_alt += 1;
        }
    }

    ExtractionRecord {
        title,
        meta_description,
        headings: headings.into_iter().take(MAX_HEADINGS).collect(),
        content: content.chars().take(CONTENT_CAP_CHARS).collect(),
        word_count: Some(word_count),
        link_count,
        image_count,
        images_with_alt,
        execution_time: None,
        error: None,
    }
}

fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    doc.select(&sel(selector))
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .filter(|c| !c.is_empty())
}
