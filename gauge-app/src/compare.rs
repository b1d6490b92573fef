//! Comparison assembly and the recommendation decision.
//!
//! Everything here is pure: the extractors and scorer have already run, and
//! this module only weighs the two sides against each other.

use chrono::{DateTime, Utc};
use gauge_score::{ExtractionRecord, QualityReport};
use serde::Serialize;
use uuid::Uuid;

/// One strategy's outcome: the record, its score, and how long it took.
#[derive(Debug, Clone, Serialize)]
pub struct SideResult {
    /// Display name, e.g. "direct HTML parsing".
    pub strategy: String,
    pub record: ExtractionRecord,
    pub total_score: u32,
    pub report: QualityReport,
    pub elapsed_secs: f64,
}

impl SideResult {
    pub fn new(strategy: &str, record: ExtractionRecord, elapsed_secs: f64) -> Self {
        let (total_score, report) = gauge_score::score(&record);
        Self {
            strategy: strategy.to_string(),
            record,
            total_score,
            report,
            elapsed_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Html,
    CrawlApi,
    /// Equal scores and effectively equal timing.
    Tie,
    /// Both extractions failed; there is nothing to recommend.
    Neither,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub winner: Winner,
    pub summary: String,
    /// Set when the winning strategy was nevertheless the slower one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caveat: Option<String>,
}

/// The full comparison handed to the renderer / serialized for `--format json`.
#[derive(Debug, Serialize)]
pub struct Comparison {
    pub run_id: Uuid,
    pub url: String,
    pub generated_at: DateTime<Utc>,
    pub html: SideResult,
    pub crawl: SideResult,
    pub recommendation: Recommendation,
}

impl Comparison {
    pub fn new(url: &url::Url, html: SideResult, crawl: SideResult) -> Self {
        let recommendation = recommend(&html, &crawl);
        Self {
            run_id: Uuid::new_v4(),
            url: url.to_string(),
            generated_at: Utc::now(),
            html,
            crawl,
            recommendation,
        }
    }
}

/// Higher total wins; equal totals fall to the faster side; a winner that
/// was slower than the loser gets a caveat.
pub fn recommend(html: &SideResult, crawl: &SideResult) -> Recommendation {
    if html.record.is_failed() && crawl.record.is_failed() {
        return Recommendation {
            winner: Winner::Neither,
            summary: "Both extraction strategies failed; no recommendation available.".to_string(),
            caveat: None,
        };
    }

    if html.total_score != crawl.total_score {
        let (winner, win, lose) = if html.total_score > crawl.total_score {
            (Winner::Html, html, crawl)
        } else {
            (Winner::CrawlApi, crawl, html)
        };
        let summary = format!(
            "{} performed better with a score of {}/110 compared to {}'s {}/110.",
            capitalize(&win.strategy),
            win.total_score,
            lose.strategy,
            lose.total_score
        );
        let caveat = (win.elapsed_secs > lose.elapsed_secs).then(|| {
            format!(
                "However, it was slower ({:.2}s vs {:.2}s).",
                win.elapsed_secs, lose.elapsed_secs
            )
        });
        return Recommendation {
            winner,
            summary,
            caveat,
        };
    }

    // Equal scores: timing decides.
    if html.elapsed_secs < crawl.elapsed_secs {
        Recommendation {
            winner: Winner::Html,
            summary: format!(
                "Both strategies scored {}/110, but {} was faster.",
                html.total_score, html.strategy
            ),
            caveat: None,
        }
    } else if crawl.elapsed_secs < html.elapsed_secs {
        Recommendation {
            winner: Winner::CrawlApi,
            summary: format!(
                "Both strategies scored {}/110, but {} was faster.",
                crawl.total_score, crawl.strategy
            ),
            caveat: None,
        }
    } else {
        Recommendation {
            winner: Winner::Tie,
            summary: format!(
                "Both strategies scored {}/110 with similar timing.",
                html.total_score
            ),
            caveat: None,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
