//! Core analyze pipeline implementation

use crate::error::AuditError;
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::validator::validate_review;
use pagelens_domain::traits::{ContentSource, ReviewModel, ReviewStore};
use pagelens_domain::{ContentSummary, PersistedReview, Review};
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use url::Url;

/// Result of one successful analyze call.
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    /// The content summary the critique was based on
    pub summary: ContentSummary,

    /// The persisted review record
    pub record: PersistedReview,
}

/// The Auditor runs one analysis pipeline per call: extract, prompt,
/// complete, validate, persist.
///
/// Concurrent analyses share only the store, whose lock serializes the
/// persist+evict critical section.
pub struct Auditor<C, M, S>
where
    C: ContentSource,
    M: ReviewModel,
    S: ReviewStore,
{
    source: Arc<C>,
    model: Arc<M>,
    store: Arc<Mutex<S>>,
}

impl<C, M, S> Auditor<C, M, S>
where
    C: ContentSource + Send + Sync + 'static,
    M: ReviewModel + Send + Sync + 'static,
    S: ReviewStore + Send + 'static,
    C::Error: Display,
    M::Error: Display,
    S::Error: Display,
{
    /// Create a new Auditor over a content source, a review model, and a
    /// shared store handle.
    pub fn new(source: C, model: M, store: Arc<Mutex<S>>) -> Self {
        Self {
            source: Arc::new(source),
            model: Arc::new(model),
            store,
        }
    }

    /// Run one full analysis for `url`.
    ///
    /// URL-syntax validation happens before anything else; a malformed
    /// URL never reaches the extractor. The URL is carried through the
    /// pipeline and persisted exactly as the caller supplied it, never
    /// in parser-normalized form. A failure at any later stage leaves
    /// the store untouched.
    pub async fn analyze(&self, url: &str) -> Result<AnalyzeOutcome, AuditError> {
        validate_url(url)?;

        info!("Analyzing {}", url);

        debug!("Extracting page content");
        let summary = self.extract(url).await?;

        debug!(
            "Summary: {} headings, {} buttons, {} paragraphs",
            summary.headings.len(),
            summary.buttons.len(),
            summary.paragraphs.len()
        );
        let prompt = build_prompt(&summary);

        debug!("Awaiting model completion ({} prompt chars)", prompt.len());
        let raw = self.complete(prompt).await?;

        debug!("Validating model output ({} chars)", raw.len());
        let review = validate_review(&raw)?;

        debug!("Persisting review (score {})", review.ux_score);
        let record = self.persist(url, review).await?;

        info!("Analysis of {} complete (score {})", url, record.score);

        Ok(AnalyzeOutcome { summary, record })
    }

    /// Fetch and summarize on a blocking worker thread.
    async fn extract(&self, url: &str) -> Result<ContentSummary, AuditError> {
        let source = Arc::clone(&self.source);
        let url = url.to_string();

        tokio::task::spawn_blocking(move || {
            source
                .extract(&url)
                .map_err(|e| AuditError::Scrape(e.to_string()))
        })
        .await
        .map_err(|e| AuditError::Internal(format!("extract task join error: {}", e)))?
    }

    /// Request a completion on a blocking worker thread.
    async fn complete(&self, prompt: String) -> Result<String, AuditError> {
        let model = Arc::clone(&self.model);

        tokio::task::spawn_blocking(move || {
            model
                .complete(SYSTEM_INSTRUCTION, &prompt)
                .map_err(|e| AuditError::ModelConnection(e.to_string()))
        })
        .await
        .map_err(|e| AuditError::Internal(format!("model task join error: {}", e)))?
    }

    /// Persist a validated review on a blocking worker thread.
    async fn persist(&self, url: &str, review: Review) -> Result<PersistedReview, AuditError> {
        let store = Arc::clone(&self.store);
        let url = url.to_string();

        tokio::task::spawn_blocking(move || {
            let mut store = store
                .lock()
                .map_err(|e| AuditError::Internal(format!("store lock poisoned: {}", e)))?;
            store
                .persist(&url, review.ux_score, review)
                .map_err(|e| AuditError::Store(e.to_string()))
        })
        .await
        .map_err(|e| AuditError::Internal(format!("persist task join error: {}", e)))?
    }
}

/// Validate URL syntax and scheme before any pipeline work.
///
/// The parse result is used for validation only; the caller's text is
/// what flows through the pipeline.
fn validate_url(url: &str) -> Result<(), AuditError> {
    let parsed = Url::parse(url).map_err(|e| AuditError::InvalidUrl(e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AuditError::InvalidUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    Ok(())
}
