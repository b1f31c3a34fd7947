//! Persisted review records and their identifiers

use crate::review::Review;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a persisted review, based on UUIDv7.
///
/// UUIDv7 identifiers sort chronologically, which lets the store break
/// ties between records created within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(uuid::Uuid);

impl ReviewId {
    /// Generate a new UUIDv7-based ReviewId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a ReviewId from its string form.
    ///
    /// Primarily for storage layer deserialization.
    pub fn parse(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid review id: {}", e))
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A durable record of one successful audit.
///
/// Created exclusively by a successful analyze call, never mutated, and
/// destroyed only by the retention store's eviction rule. The embedded
/// [`Review`] is stored as-is, with no normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedReview {
    /// Opaque identifier assigned on creation
    pub id: ReviewId,

    /// URL that was audited
    pub url: String,

    /// Score copied from the review at creation time
    pub score: f64,

    /// The validated review, embedded as-is
    pub review: Review,

    /// Creation time in unix milliseconds, monotonically non-decreasing
    /// across creations
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}
