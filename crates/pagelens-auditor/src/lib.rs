//! Pagelens Auditor
//!
//! The analyze pipeline: renders an extracted content summary into a
//! model prompt, validates the model's raw output against the review
//! schema, and persists the result into the bounded retention store.
//!
//! # Architecture
//!
//! ```text
//! URL → ContentSource → build_prompt → ReviewModel → validate_review → ReviewStore
//! ```
//!
//! Every stage failure maps into the [`AuditError`] taxonomy, and no
//! persistence happens on any failure: a record exists only for fully
//! validated reviews.

#![warn(missing_docs)]

mod auditor;
mod error;
mod prompt;
mod validator;

pub use auditor::{AnalyzeOutcome, Auditor};
pub use error::AuditError;
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use validator::validate_review;
