//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur while fetching and summarizing a page
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// URL failed syntax validation or has an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network-level fetch failure
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Non-success transport status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Response body could not be read or parsed as markup
    #[error("Unreadable page body: {0}")]
    Body(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
