//! Page-extraction strategies that produce normalized [`ExtractionRecord`]s.
//!
//! - [`Extractor`]: the capability both strategies implement; callers hold a
//!   `&dyn Extractor` and never learn which backend ran
//! - [`html::HtmlExtractor`]: direct fetch + parse of the page markup
//!
//! The managed crawl-API strategy lives in `gauge-crawl` and implements the
//! same trait. Extraction is infallible at the type level: any failure is
//! reported in-band through the record's `error` field so the caller can
//! score it (to zero) and keep going with the other strategy.

use async_trait::async_trait;
use gauge_score::ExtractionRecord;
use url::Url;

pub mod html;

/// Desktop browser identity used for direct page fetches.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// One extraction strategy. Implementations are passed to the comparison
/// runner as explicit capabilities; there is no global extractor state.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short strategy name used in logs and report headings.
    fn name(&self) -> &'static str;

    /// Run one extraction attempt against `url`.
    ///
    /// Never returns `Err`; a failed attempt comes back as
    /// [`ExtractionRecord::failed`]. Timing is the caller's concern — wrap
    /// the call in [`gauge_common::timing::timed`] and attach the elapsed
    /// seconds to a successful record.
    async fn extract(&self, url: &Url) -> ExtractionRecord;
}
