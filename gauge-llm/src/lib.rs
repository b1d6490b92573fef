//! LLM report generation for pagegauge.
//!
//! This crate exposes the [`traits::LlmClient`] capability, an OpenAI-backed
//! implementation, and the SEO prompt layer that turns scored extraction
//! records into prose reports. Consumers receive the client as an explicit
//! argument (`&dyn LlmClient` or an `Arc` of it) — there is no process-wide
//! client state.
//!
//! # Examples
//! ```no_run
//! use gauge_llm::openai::OpenAiClient;
//! use gauge_llm::traits::LlmClient;
//!
//! # fn demo() -> gauge_common::Result<()> {
//! let client = OpenAiClient::new("sk-...".into(), "gpt-4o-mini".into(), None)?;
//! assert_eq!(client.model_name(), "gpt-4o-mini");
//! # Ok(())
//! # }
//! ```

pub mod openai;
pub mod seo;
pub mod traits;

/// Default model recommendation for SEO report generation.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
