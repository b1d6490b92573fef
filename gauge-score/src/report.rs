use serde::{Deserialize, Serialize};

/// Maximum attainable total: 20 + 15 + 15 + 30 + 20 + 10.
pub const MAX_TOTAL_SCORE: u32 = 110;

/// Points per scoring category. Each stays within its fixed sub-range for
/// any input: title 0–20, meta_description 0–15, headings 0–15,
/// content 0–30, additional_elements 0–20, performance 4–10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub title: u32,
    pub meta_description: u32,
    pub headings: u32,
    pub content: u32,
    pub additional_elements: u32,
    pub performance: u32,
}

impl CategoryScores {
    pub fn total(&self) -> u32 {
        self.title
            + self.meta_description
            + self.headings
            + self.content
            + self.additional_elements
            + self.performance
    }
}

/// Qualitative report derived from one scored record.
///
/// Serializes to one of two shapes: a failed extraction becomes
/// `{"error": "..."}` with no other keys, and a scored one becomes
/// `{"completeness": .., "detail_scores": {..}, "strengths": [..],
/// "weaknesses": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QualityReport {
    Failed { error: String },
    Scored(ScoredReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReport {
    /// Total rescaled from 0–110 to a 0–100 percentage; the clamp at 100 is
    /// defensive since the category caps already bound the total.
    pub completeness: f64,
    pub detail_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_report_serializes_to_error_only() {
        let report = QualityReport::Failed {
            error: "fetch error: timeout".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["error"], "fetch error: timeout");
    }

    #[test]
    fn reports_round_trip_through_json() {
        let report = QualityReport::Scored(ScoredReport {
            completeness: 50.0,
            detail_scores: CategoryScores {
                title: 20,
                meta_description: 15,
                headings: 0,
                content: 10,
                additional_elements: 0,
                performance: 10,
            },
            strengths: vec!["Strong title extraction".into()],
            weaknesses: vec!["Poor heading extraction".into()],
        });
        let json = serde_json::to_string(&report).unwrap();
        let back: QualityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);

        let failed = QualityReport::Failed {
            error: "boom".into(),
        };
        let json = serde_json::to_string(&failed).unwrap();
        let back: QualityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, failed);
    }
}
