//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the audit pipeline and its
//! infrastructure. Implementations live in other crates; the pipeline
//! drives the blocking implementations from async code via
//! `spawn_blocking`.

use crate::content::ContentSummary;
use crate::record::PersistedReview;
use crate::review::Review;

/// Trait for fetching a URL and summarizing its visible content
///
/// Implemented by the infrastructure layer (pagelens-extractor)
pub trait ContentSource {
    /// Error type for extraction operations
    type Error;

    /// Fetch the page at `url` and derive a content summary.
    ///
    /// A single failed fetch is a single failed extraction; no retries.
    fn extract(&self, url: &str) -> Result<ContentSummary, Self::Error>;
}

/// Trait for generative model completions
///
/// Implemented by the infrastructure layer (pagelens-llm)
pub trait ReviewModel {
    /// Error type for model operations
    type Error;

    /// Send a system instruction and user prompt, return the raw completion text.
    fn complete(&self, system: &str, prompt: &str) -> Result<String, Self::Error>;

    /// Cheap connectivity probe for status reporting.
    fn check(&self) -> Result<(), Self::Error>;
}

/// Trait for the bounded-retention review store
///
/// Implemented by the infrastructure layer (pagelens-store)
pub trait ReviewStore {
    /// Error type for store operations
    type Error;

    /// Persist a validated review and enforce the retention window.
    ///
    /// After a successful persist the store holds at most its configured
    /// number of records; the oldest record is evicted in the same
    /// operation when the cap would be exceeded.
    fn persist(&mut self, url: &str, score: f64, review: Review)
        -> Result<PersistedReview, Self::Error>;

    /// List up to `n` persisted reviews, most recent first.
    fn list_recent(&self, n: usize) -> Result<Vec<PersistedReview>, Self::Error>;

    /// Connectivity probe for status reporting.
    fn ping(&self) -> Result<(), Self::Error>;
}
