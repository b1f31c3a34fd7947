//! Pagelens Extractor
//!
//! Fetches a web page and derives a [`ContentSummary`] from its markup.
//!
//! # Overview
//!
//! The extractor is a pure read of the returned HTML: it selects the page
//! title, headings (`h1`-`h3`), button and anchor text, form markers, and
//! the first ten paragraphs, all in document order. No JavaScript is
//! executed, no redirects are followed beyond what the HTTP client does
//! automatically, and a failed fetch is surfaced immediately with no
//! retry.
//!
//! # Architecture
//!
//! ```text
//! URL → fetch (reqwest, browser user agent) → summarize_html → ContentSummary
//! ```
//!
//! [`ContentSummary`]: pagelens_domain::ContentSummary

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;

pub use config::ExtractorConfig;
pub use error::ScrapeError;
pub use extractor::{summarize_html, ContentExtractor, StaticSource};
