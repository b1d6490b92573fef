use crate::record::ExtractionRecord;
use crate::report::{CategoryScores, QualityReport, ScoredReport};

/// Score one extraction record for its suitability as SEO-analysis input.
///
/// Returns the total (0–110) together with the qualitative report. A record
/// carrying `error` short-circuits to `(0, error-only report)` without any
/// other field being inspected. Never panics for any record shape.
pub fn score(record: &ExtractionRecord) -> (u32, QualityReport) {
    if let Some(error) = &record.error {
        return (
            0,
            QualityReport::Failed {
                error: error.clone(),
            },
        );
    }

    let scores = CategoryScores {
        title: score_title(record.title_text()),
        meta_description: score_meta_description(record.meta_description_text()),
        headings: score_headings(&record.headings),
        content: score_content(record.word_count, &record.content),
        additional_elements: score_additional_elements(record),
        performance: score_performance(record.execution_time),
    };
    let total = scores.total();

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if scores.title >= 15 {
        strengths.push("Strong title extraction".to_string());
    } else if scores.title <= 10 {
        weaknesses.push("Poor title extraction".to_string());
    }

    if scores.meta_description >= 10 {
        strengths.push("Good meta description".to_string());
    } else if scores.meta_description <= 5 {
        weaknesses.push("Weak meta description".to_string());
    }

    if scores.content >= 25 {
        strengths.push("Rich content extraction".to_string());
    } else if scores.content <= 15 {
        weaknesses.push("Limited content extraction".to_string());
    }

    if scores.headings >= 10 {
        strengths.push("Good heading structure".to_string());
    } else {
        weaknesses.push("Poor heading extraction".to_string());
    }

    if scores.additional_elements >= 15 {
        strengths.push("Comprehensive additional elements".to_string());
    } else if scores.additional_elements <= 5 {
        weaknesses.push("Missing important SEO elements".to_string());
    }

    if scores.performance >= 8 {
        strengths.push("Excellent performance".to_string());
    } else if scores.performance <= 5 {
        weaknesses.push("Slow extraction time".to_string());
    }

    tracing::debug!(total, ?scores, "record scored");

    let report = ScoredReport {
        completeness: (f64::from(total) / 1.1).min(100.0),
        detail_scores: scores,
        strengths,
        weaknesses,
    };
    (total, QualityReport::Scored(report))
}

/// Title quality, 0–20. Lengths are in chars, not bytes.
fn score_title(title: Option<&str>) -> u32 {
    let Some(title) = title else { return 0 };
    let len = title.chars().count();
    if (10..=60).contains(&len) {
        20
    } else if (5..10).contains(&len) || (61..=80).contains(&len) {
        15
    } else {
        10
    }
}

/// Meta description quality, 0–15.
fn score_meta_description(meta: Option<&str>) -> u32 {
    let Some(meta) = meta else { return 0 };
    let len = meta.chars().count();
    if (50..=160).contains(&len) {
        15
    } else if (30..50).contains(&len) || (161..=200).contains(&len) {
        10
    } else {
        5
    }
}

/// Heading structure, 0–15. An empty sequence scores 0, same as an absent
/// title or meta description.
fn score_headings(headings: &[String]) -> u32 {
    if headings.is_empty() {
        0
    } else if headings.len() >= 3 {
        15
    } else {
        10
    }
}

/// Content volume, 0–30. A declared nonzero word count wins over counting
/// `content`; zero counts as undeclared.
fn score_content(word_count: Option<u32>, content: &str) -> u32 {
    let declared = word_count.unwrap_or(0);
    if declared == 0 && content.is_empty() {
        return 0;
    }
    let words = if declared > 0 {
        declared as usize
    } else {
        content.split_whitespace().count()
    };
    if words >= 500 {
        30
    } else if words >= 300 {
        25
    } else if words >= 100 {
        15
    } else {
        10
    }
}

/// Links, images, and alt text, 0–20. Independent additive checks.
fn score_additional_elements(record: &ExtractionRecord) -> u32 {
    let mut points = 0;
    if record.link_count > 0 {
        points += 10;
    }
    if record.image_count > 0 {
        points += 5;
    }
    if record.images_with_alt > 0 {
        points += 5;
    }
    points
}

/// Extraction speed, 4–10. An unmeasured extraction defaults to 10 seconds.
fn score_performance(execution_time: Option<f64>) -> u32 {
    let secs = execution_time.unwrap_or(10.0);
    if secs <= 2.0 {
        10
    } else if secs <= 5.0 {
        8
    } else if secs <= 10.0 {
        6
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NO_META_DESCRIPTION_SENTINEL, NO_TITLE_SENTINEL};

    fn title_of(len: usize) -> Option<String> {
        Some("x".repeat(len))
    }

    #[test]
    fn title_band_boundaries() {
        for (len, expected) in [
            (10, 20),
            (60, 20),
            (9, 15),
            (5, 15),
            (61, 15),
            (80, 15),
            (4, 10),
            (81, 10),
        ] {
            let record = ExtractionRecord {
                title: title_of(len),
                ..Default::default()
            };
            let (_, report) = score(&record);
            let QualityReport::Scored(report) = report else {
                panic!("expected scored report");
            };
            assert_eq!(report.detail_scores.title, expected, "title length {len}");
        }
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        // Ten two-byte chars: in-band by chars, out of the top band by bytes.
        let record = ExtractionRecord {
            title: Some("é".repeat(10)),
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.title, 20);
    }

    #[test]
    fn sentinel_and_empty_title_score_zero() {
        for title in [None, Some(String::new()), Some(NO_TITLE_SENTINEL.into())] {
            let record = ExtractionRecord {
                title,
                ..Default::default()
            };
            let (_, report) = score(&record);
            let QualityReport::Scored(report) = report else {
                panic!("expected scored report");
            };
            assert_eq!(report.detail_scores.title, 0);
        }
    }

    #[test]
    fn meta_description_bands() {
        for (len, expected) in [(50, 15), (160, 15), (30, 10), (49, 10), (161, 10), (200, 10), (29, 5), (201, 5)] {
            let record = ExtractionRecord {
                meta_description: Some("m".repeat(len)),
                ..Default::default()
            };
            let (_, report) = score(&record);
            let QualityReport::Scored(report) = report else {
                panic!("expected scored report");
            };
            assert_eq!(
                report.detail_scores.meta_description, expected,
                "meta length {len}"
            );
        }

        let record = ExtractionRecord {
            meta_description: Some(NO_META_DESCRIPTION_SENTINEL.into()),
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.meta_description, 0);
    }

    #[test]
    fn heading_counts() {
        for (count, expected) in [(0usize, 0), (1, 10), (2, 10), (3, 15), (5, 15)] {
            let record = ExtractionRecord {
                headings: vec!["H".to_string(); count],
                ..Default::default()
            };
            let (_, report) = score(&record);
            let QualityReport::Scored(report) = report else {
                panic!("expected scored report");
            };
            assert_eq!(report.detail_scores.headings, expected, "{count} headings");
        }
    }

    #[test]
    fn content_bands_prefer_declared_word_count() {
        let record = ExtractionRecord {
            // Two words of content, but the producer declared 500.
            content: "two words".into(),
            word_count: Some(500),
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.content, 30);
    }

    #[test]
    fn content_derives_count_when_undeclared() {
        for word_count in [None, Some(0)] {
            let record = ExtractionRecord {
                content: "alpha beta gamma".into(),
                word_count,
                ..Default::default()
            };
            let (_, report) = score(&record);
            let QualityReport::Scored(report) = report else {
                panic!("expected scored report");
            };
            // Three words: below 100, but content is present.
            assert_eq!(report.detail_scores.content, 10);
        }
    }

    #[test]
    fn no_content_at_all_scores_zero() {
        let (_, report) = score(&ExtractionRecord::default());
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.content, 0);
    }

    #[test]
    fn whitespace_only_content_counts_as_present() {
        // Non-empty content with zero derivable words still lands in the
        // bottom non-empty band.
        let record = ExtractionRecord {
            content: "   ".into(),
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.content, 10);
    }

    #[test]
    fn additional_elements_are_additive() {
        let record = ExtractionRecord {
            link_count: 3,
            image_count: 0,
            images_with_alt: 0,
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.additional_elements, 10);

        let record = ExtractionRecord {
            link_count: 3,
            image_count: 2,
            images_with_alt: 1,
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.additional_elements, 20);
    }

    #[test]
    fn performance_tiers() {
        for (secs, expected) in [(1.0, 10), (2.0, 10), (2.1, 8), (5.0, 8), (9.9, 6), (10.0, 6), (12.0, 4)] {
            let record = ExtractionRecord {
                execution_time: Some(secs),
                ..Default::default()
            };
            let (_, report) = score(&record);
            let QualityReport::Scored(report) = report else {
                panic!("expected scored report");
            };
            assert_eq!(report.detail_scores.performance, expected, "{secs}s");
        }

        // Unmeasured extraction defaults to the 10-second tier.
        let (_, report) = score(&ExtractionRecord::default());
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(report.detail_scores.performance, 6);
    }

    #[test]
    fn label_order_is_stable() {
        let record = ExtractionRecord {
            title: Some("A perfectly reasonable page title".into()),
            meta_description: Some("m".repeat(100)),
            headings: vec!["a".into(), "b".into(), "c".into()],
            word_count: Some(800),
            link_count: 4,
            image_count: 2,
            images_with_alt: 2,
            execution_time: Some(1.0),
            ..Default::default()
        };
        let (total, report) = score(&record);
        assert_eq!(total, 110);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert_eq!(
            report.strengths,
            vec![
                "Strong title extraction",
                "Good meta description",
                "Rich content extraction",
                "Good heading structure",
                "Comprehensive additional elements",
                "Excellent performance",
            ]
        );
        assert!(report.weaknesses.is_empty());
    }

    #[test]
    fn headings_label_is_either_or() {
        // Headings always land in exactly one of the two lists.
        let record = ExtractionRecord {
            headings: vec![],
            ..Default::default()
        };
        let (_, report) = score(&record);
        let QualityReport::Scored(report) = report else {
            panic!("expected scored report");
        };
        assert!(report
            .weaknesses
            .iter()
            .any(|w| w == "Poor heading extraction"));
        assert!(!report.strengths.iter().any(|s| s == "Good heading structure"));
    }
}
