//! SEO prompt layer: turns extraction records into prose reports.
//!
//! Two entry points, both taking the LLM as an explicit capability:
//! [`seo_report`] analyses a single successful record, and
//! [`compare_extractions`] asks for a head-to-head verdict on the two
//! strategies' records. Failed records are refused with a typed error
//! before any tokens are spent.

use crate::traits::LlmClient;
use gauge_common::{GaugeError, Result};
use gauge_score::ExtractionRecord;

/// Cap on the content excerpt embedded in the single-record prompt.
const CONTENT_EXCERPT_CHARS: usize = 1500;

/// Generate a full SEO analysis for one successfully extracted page.
pub async fn seo_report(
    llm: &dyn LlmClient,
    record: &ExtractionRecord,
    website_url: &str,
    niche: &str,
    tagline: &str,
) -> Result<String> {
    if let Some(error) = &record.error {
        return Err(GaugeError::Llm(format!(
            "cannot generate SEO analysis: {error}"
        )));
    }

    let prompt = build_seo_prompt(record, website_url, niche, tagline);
    let response = llm
        .generate(&prompt, Some(llm.default_seo_system_prompt()), Some(2000), None)
        .await?;

    tracing::debug!(
        model = ?response.model,
        report_len = response.text.len(),
        "seo report generated"
    );
    Ok(response.text)
}

/// Ask for a technical comparison of the two strategies' records.
///
/// Proceeds when at least one side succeeded; the prompt includes failed
/// sides as-is so the model can weigh reliability too.
pub async fn compare_extractions(
    llm: &dyn LlmClient,
    html_record: &ExtractionRecord,
    crawl_record: &ExtractionRecord,
) -> Result<String> {
    if html_record.is_failed() && crawl_record.is_failed() {
        return Err(GaugeError::Llm(
            "both extractions failed, no comparison possible".to_string(),
        ));
    }

    let system = "You are an expert in SEO and data quality analysis. Your task is to compare \
                  two different sets of website data and determine which would be more effective \
                  for SEO analysis. Provide a detailed technical comparison.";
    let prompt = build_comparison_prompt(html_record, crawl_record);
    let response = llm.generate(&prompt, Some(system), Some(1000), None).await?;
    Ok(response.text)
}

fn build_seo_prompt(
    record: &ExtractionRecord,
    website_url: &str,
    niche: &str,
    tagline: &str,
) -> String {
    let excerpt: String = record.content.chars().take(CONTENT_EXCERPT_CHARS).collect();

    format!(
        "You are analyzing a website for on-page optimization.\n\
         \n\
         Website URL: {website_url}\n\
         Niche: {niche}\n\
         Tagline: {tagline}\n\
         \n\
         Website data:\n\
         Title: {title}\n\
         Meta Description: {meta}\n\
         Headings: {headings}\n\
         Word Count: {word_count}\n\
         Links: {links}\n\
         Images: {images} (with alt text: {images_with_alt})\n\
         \n\
         Content excerpt:\n\
         {excerpt}\n\
         \n\
         Provide a comprehensive SEO analysis including:\n\
         1. Title tag evaluation and suggestions for improvement\n\
         2. Meta description assessment and recommendations\n\
         3. Heading structure analysis\n\
         4. Content quality assessment (uniqueness, relevance, readability)\n\
         5. Internal linking recommendations\n\
         6. Image optimization suggestions\n\
         7. Overall SEO score (out of 100)\n\
         8. Top 3 prioritized action items to improve SEO\n\
         \n\
         Format the response as detailed markdown sections with clear headings.",
        title = record.title.as_deref().unwrap_or("Not available"),
        meta = record.meta_description.as_deref().unwrap_or("Not available"),
        headings = serde_json::to_string(&record.headings).unwrap_or_else(|_| "[]".into()),
        word_count = record.word_count.unwrap_or(0),
        links = record.link_count,
        images = record.image_count,
        images_with_alt = record.images_with_alt,
    )
}

fn build_comparison_prompt(
    html_record: &ExtractionRecord,
    crawl_record: &ExtractionRecord,
) -> String {
    format!(
        "Compare these two data extractions from the same website and determine which would be \
         more effective for SEO analysis.\n\
         \n\
         Direct HTML extraction:\n\
         {html_summary}\n\
         Content length: {html_len} characters\n\
         \n\
         Crawl API extraction:\n\
         {crawl_summary}\n\
         Content length: {crawl_len} characters\n\
         \n\
         Compare them on:\n\
         1. Data completeness and accuracy for SEO analysis\n\
         2. Content extraction quality\n\
         3. Structured data capture\n\
         4. Technical advantages/disadvantages\n\
         5. Which would produce better SEO analysis results and why\n\
         \n\
         Provide your conclusion about which tool a developer should choose for SEO analysis \
         purposes.",
        html_summary = summary_json(html_record),
        html_len = html_record.content.chars().count(),
        crawl_summary = summary_json(crawl_record),
        crawl_len = crawl_record.content.chars().count(),
    )
}

/// Record as pretty JSON with the content blob stripped; the prompts carry
/// an excerpt or just the length instead.
fn summary_json(record: &ExtractionRecord) -> String {
    let mut value = serde_json::to_value(record).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.remove("content");
    }
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LlmResponse;
    use async_trait::async_trait;

    struct CannedLlm;

    #[async_trait]
    impl LlmClient for CannedLlm {
        async fn generate(
            &self,
            _prompt: &str,
            _system_prompt: Option<&str>,
            _max_tokens: Option<u32>,
            _temperature: Option<f32>,
        ) -> Result<LlmResponse> {
            Ok(LlmResponse {
                text: "canned analysis".into(),
                model: Some("canned".into()),
                tokens_used: None,
            })
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn sample_record() -> ExtractionRecord {
        ExtractionRecord {
            title: Some("A Title".into()),
            meta_description: Some("A description".into()),
            headings: vec!["One".into()],
            content: "lots of page text ".repeat(200),
            word_count: Some(800),
            link_count: 3,
            image_count: 1,
            images_with_alt: 1,
            execution_time: Some(1.2),
            error: None,
        }
    }

    #[tokio::test]
    async fn report_refuses_failed_record() {
        let record = ExtractionRecord::failed("html extractor error: 404");
        let err = seo_report(&CannedLlm, &record, "https://x.test", "coffee", "best beans")
            .await
            .unwrap_err();
        assert!(matches!(err, GaugeError::Llm(_)));
    }

    #[tokio::test]
    async fn report_returns_generated_text() {
        let text = seo_report(
            &CannedLlm,
            &sample_record(),
            "https://x.test",
            "coffee",
            "best beans",
        )
        .await
        .unwrap();
        assert_eq!(text, "canned analysis");
    }

    #[tokio::test]
    async fn comparison_requires_one_success() {
        let failed = ExtractionRecord::failed("boom");
        let err = compare_extractions(&CannedLlm, &failed, &failed)
            .await
            .unwrap_err();
        assert!(matches!(err, GaugeError::Llm(_)));

        let ok = compare_extractions(&CannedLlm, &sample_record(), &failed)
            .await
            .unwrap();
        assert_eq!(ok, "canned analysis");
    }

    #[test]
    fn seo_prompt_caps_the_excerpt() {
        let record = sample_record();
        let prompt = build_seo_prompt(&record, "https://x.test", "coffee", "best beans");
        // Excerpt plus the fixed scaffolding stays well under the raw length.
        assert!(prompt.len() < record.content.len());
        assert!(prompt.contains("Title: A Title"));
        assert!(prompt.contains("Word Count: 800"));
    }

    #[test]
    fn summary_json_strips_content() {
        let summary = summary_json(&sample_record());
        assert!(summary.contains("\"title\""));
        assert!(!summary.contains("lots of page text"));
    }

    #[test]
    fn absent_fields_render_as_not_available() {
        let prompt = build_seo_prompt(
            &ExtractionRecord::default(),
            "https://x.test",
            "coffee",
            "best beans",
        );
        assert!(prompt.contains("Title: Not available"));
        assert!(prompt.contains("Meta Description: Not available"));
    }
}
