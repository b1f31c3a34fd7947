//! Pagelens Domain Layer
//!
//! Core types and trait seams for the UX audit pipeline. This crate defines
//! the data shapes that cross component boundaries and the traits the
//! infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **ContentSummary**: the structured extraction of a page's visible content
//! - **Review**: the model-produced UX critique (score, issues, top fixes)
//! - **PersistedReview**: a durable, immutable record of one audit
//! - **ServiceState**: explicit connectivity value for status reporting
//!
//! ## Architecture
//!
//! Infrastructure implementations (HTTP fetch, LLM client, SQLite store)
//! live in other crates and plug in through the traits defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod record;
pub mod review;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use content::ContentSummary;
pub use record::{PersistedReview, ReviewId};
pub use review::{IssueCategory, Review, ReviewIssue, Severity, TopFix};
pub use status::ServiceState;
