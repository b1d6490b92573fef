use serde::{Deserialize, Serialize};

/// Placeholder some producers emit instead of omitting the title.
pub const NO_TITLE_SENTINEL: &str = "No title found";
/// Placeholder some producers emit instead of omitting the meta description.
pub const NO_META_DESCRIPTION_SENTINEL: &str = "No meta description found";

/// Normalized output of one page-extraction attempt, successful or failed.
///
/// Producers in this workspace leave absent fields as `None`; records that
/// arrive from elsewhere may instead carry the legacy sentinel strings, which
/// the scorer treats identically to absence.
///
/// `images_with_alt <= image_count` is a producer invariant; the scorer does
/// not validate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub headings: Vec<String>,
    /// Body text, truncated upstream (the extractors cap it at 3000 chars).
    #[serde(default)]
    pub content: String,
    /// Word count as reported by the producer; the scorer derives its own
    /// from `content` when this is absent or zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub link_count: u32,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub images_with_alt: u32,
    /// Seconds the extraction took, attached by the caller after timing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    /// Present iff the extraction failed; all other fields are then ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionRecord {
    /// A record representing a failed extraction attempt.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Title with emptiness and the legacy sentinel normalized away.
    pub fn title_text(&self) -> Option<&str> {
        normalize(self.title.as_deref(), NO_TITLE_SENTINEL)
    }

    /// Meta description with emptiness and the legacy sentinel normalized away.
    pub fn meta_description_text(&self) -> Option<&str> {
        normalize(self.meta_description.as_deref(), NO_META_DESCRIPTION_SENTINEL)
    }
}

fn normalize<'a>(text: Option<&'a str>, sentinel: &str) -> Option<&'a str> {
    match text {
        Some(t) if !t.is_empty() && t != sentinel => Some(t),
        _ => None,
    }
}
