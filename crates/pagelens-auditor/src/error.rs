//! Error taxonomy for the analyze pipeline

use thiserror::Error;

/// Errors that can occur during one analyze call.
///
/// Each variant corresponds to one failure boundary of the pipeline; the
/// HTTP layer maps them onto status codes and JSON error bodies.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Client input failed URL-syntax validation; nothing downstream ran
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page could not be fetched or parsed; no model call attempted
    #[error("Scrape failed: {0}")]
    Scrape(String),

    /// The model service was unreachable; no validation attempted
    #[error("Model connection failed: {0}")]
    ModelConnection(String),

    /// Model output failed schema validation. The untouched raw text is
    /// kept: it is the only artifact available to debug non-compliance.
    #[error("Schema violation: {message}")]
    Schema {
        /// What failed: parse error or shape violation
        message: String,
        /// The raw model output, exactly as received
        raw: String,
    },

    /// Persistence failure after a validated review
    #[error("Store failure: {0}")]
    Store(String),

    /// Pipeline plumbing failure (task join, poisoned lock)
    #[error("Internal error: {0}")]
    Internal(String),
}
