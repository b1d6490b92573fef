//! Plain-text rendering of a [`Comparison`].
//!
//! JSON output is plain serde; this module only exists for the human case.

use crate::compare::{Comparison, SideResult};
use gauge_score::QualityReport;
use std::fmt::Write;

pub fn render_text(comparison: &Comparison) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Extraction comparison for {}", comparison.url);
    let _ = writeln!(
        out,
        "run {} at {}",
        comparison.run_id,
        comparison.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    render_side(&mut out, &comparison.html);
    render_side(&mut out, &comparison.crawl);

    let _ = writeln!(out, "\n== Recommendation ==");
    let _ = writeln!(out, "{}", comparison.recommendation.summary);
    if let Some(caveat) = &comparison.recommendation.caveat {
        let _ = writeln!(out, "{caveat}");
    }

    out
}

fn render_side(out: &mut String, side: &SideResult) {
    let _ = writeln!(out, "\n== {} ==", side.strategy);

    match &side.report {
        QualityReport::Failed { error } => {
            let _ = writeln!(out, "error: {error}");
        }
        QualityReport::Scored(report) => {
            let _ = writeln!(out, "completed in {:.2}s", side.elapsed_secs);
            let _ = writeln!(
                out,
                "title: {}",
                side.record.title.as_deref().unwrap_or("-")
            );
            let _ = writeln!(
                out,
                "words: {}  links: {}  images: {} ({} with alt)  headings: {}",
                side.record.word_count.unwrap_or(0),
                side.record.link_count,
                side.record.image_count,
                side.record.images_with_alt,
                side.record.headings.len()
            );
            let _ = writeln!(
                out,
                "score: {}/110  (completeness {:.1}%)",
                side.total_score, report.completeness
            );
            let _ = writeln!(
                out,
                "  title {}  meta {}  headings {}  content {}  extras {}  speed {}",
                report.detail_scores.title,
                report.detail_scores.meta_description,
                report.detail_scores.headings,
                report.detail_scores.content,
                report.detail_scores.additional_elements,
                report.detail_scores.performance
            );
            if !report.strengths.is_empty() {
                let _ = writeln!(out, "strengths: {}", report.strengths.join(", "));
            }
            if !report.weaknesses.is_empty() {
                let _ = writeln!(out, "weaknesses: {}", report.weaknesses.join(", "));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::SideResult;
    use gauge_score::ExtractionRecord;
    use url::Url;

    #[test]
    fn text_output_covers_both_sides_and_the_verdict() {
        let html = SideResult::new(
            "direct HTML parsing",
            ExtractionRecord {
                title: Some("A reasonable page title".into()),
                word_count: Some(350),
                link_count: 2,
                execution_time: Some(1.1),
                ..Default::default()
            },
            1.1,
        );
        let crawl = SideResult::new(
            "the crawl API",
            ExtractionRecord::failed("crawl api error: api key not configured"),
            0.0,
        );
        let comparison = Comparison::new(&Url::parse("https://example.com").unwrap(), html, crawl);

        let text = render_text(&comparison);
        assert!(text.contains("== direct HTML parsing =="));
        assert!(text.contains("== the crawl API =="));
        assert!(text.contains("error: crawl api error: api key not configured"));
        assert!(text.contains("== Recommendation =="));
        assert!(text.contains("score:"));
    }

    #[test]
    fn scored_side_never_prints_the_content_blob() {
        let html = SideResult::new(
            "direct HTML parsing",
            ExtractionRecord {
                content: "SECRET-CONTENT-MARKER ".repeat(50),
                word_count: Some(100),
                ..Default::default()
            },
            0.5,
        );
        let crawl = SideResult::new(
            "the crawl API",
            ExtractionRecord::failed("crawl api error: skipped"),
            0.0,
        );
        let comparison = Comparison::new(&Url::parse("https://example.com").unwrap(), html, crawl);

        let text = render_text(&comparison);
        assert!(!text.contains("SECRET-CONTENT-MARKER"));
    }
}
