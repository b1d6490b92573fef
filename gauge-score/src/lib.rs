//! Extraction-quality scoring for SEO analysis inputs.
//!
//! Every page-extraction attempt — whether it came from the direct HTML
//! parser or from the managed crawl API — is normalized into an
//! [`ExtractionRecord`]. [`score`] maps a record to a bounded total
//! (0–110) plus a [`QualityReport`] with per-category points, strengths,
//! and weaknesses. The caller compares totals across the two strategies
//! and feeds the winning record to the LLM report generator.
//!
//! The scorer is a pure, synchronous function: no I/O, no shared state,
//! and no failure mode of its own. A failed extraction is data — a record
//! carrying `error` scores 0 and produces an error-only report.
//!
//! ```
//! use gauge_score::{score, ExtractionRecord, QualityReport};
//!
//! let record = ExtractionRecord {
//!     title: Some("Best Coffee Shops in Seattle".into()),
//!     headings: vec!["Top Picks".into()],
//!     word_count: Some(120),
//!     ..Default::default()
//! };
//! let (total, report) = score(&record);
//! assert!(total <= 110);
//! assert!(matches!(report, QualityReport::Scored(_)));
//! ```

mod record;
mod report;
mod scorer;

pub use record::{ExtractionRecord, NO_META_DESCRIPTION_SENTINEL, NO_TITLE_SENTINEL};
pub use report::{CategoryScores, QualityReport, ScoredReport, MAX_TOTAL_SCORE};
pub use scorer::score;
