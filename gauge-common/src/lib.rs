//! Common types and utilities shared across the pagegauge crates.
//!
//! This crate carries the shared error type, the `tracing` bootstrap used by
//! every binary and integration test, and the duration-measurement helper the
//! extractors use to stamp records. It is intentionally lightweight so that
//! all crates can depend on it without pulling in heavy transitive costs.
//!
//! # Overview
//!
//! - [`GaugeError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`timing`]: measure an async operation's wall-clock duration

pub mod observability;
pub mod timing;

/// Error types used across the pagegauge system.
#[derive(thiserror::Error, Debug)]
pub enum GaugeError {
    /// An extractor could not be constructed or driven.
    ///
    /// Note this is NOT how a failed page extraction is reported: those are
    /// carried in-band on the extraction record itself.
    #[error("Extractor error: {0}")]
    Extractor(String),

    /// The LLM report generator failed or refused the request.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lower-level failure surfaced through anyhow.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`GaugeError`].
pub type Result<T> = std::result::Result<T, GaugeError>;
