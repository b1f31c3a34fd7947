//! HTTP request handlers for the audit service.
//!
//! Implements the analyze, reviews-listing, and health endpoints using
//! axum. Every pipeline failure is caught here and turned into a
//! structured JSON error body; the caller never sees a bare transport
//! error.

use crate::status::{self, Connectivity, StatusSnapshot};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use pagelens_auditor::{AuditError, Auditor};
use pagelens_domain::traits::{ContentSource, ReviewModel, ReviewStore};
use pagelens_domain::{ContentSummary, PersistedReview, Review};
use pagelens_store::{SqliteStore, RETENTION_WINDOW};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::error;

/// Shared application state
pub struct AppState<C, M>
where
    C: ContentSource,
    M: ReviewModel,
{
    /// The analyze pipeline
    pub auditor: Arc<Auditor<C, M, SqliteStore>>,
    /// Store handle shared with the auditor
    pub store: Arc<Mutex<SqliteStore>>,
    /// Last known collaborator connectivity
    pub connectivity: Arc<Connectivity>,
    /// Process start time, for uptime reporting
    pub started_at: Instant,
}

// Manual impl: deriving Clone would demand C: Clone and M: Clone, which
// the Arcs make unnecessary.
impl<C, M> Clone for AppState<C, M>
where
    C: ContentSource,
    M: ReviewModel,
{
    fn clone(&self) -> Self {
        Self {
            auditor: Arc::clone(&self.auditor),
            store: Arc::clone(&self.store),
            connectivity: Arc::clone(&self.connectivity),
            started_at: self.started_at,
        }
    }
}

/// Analyze request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// URL to audit; missing is a 400 before any pipeline work
    pub url: Option<String>,
}

/// Successful analyze response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// The content summary the critique was based on
    #[serde(rename = "scrapedData")]
    pub scraped_data: ContentSummary,

    /// The validated review
    pub review: Review,
}

/// JSON error body; `rawResponse` is present only for schema violations.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Raw model output, surfaced for schema-violation diagnosis
    #[serde(rename = "rawResponse", skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request body was not valid JSON for the expected shape
    BadBody(JsonRejection),
    /// Request body had no url field
    MissingUrl,
    /// Pipeline failure
    Audit(AuditError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Keep the rejection's status but always answer with the
            // JSON error shape, never a plain-text transport error.
            AppError::BadBody(rejection) => (
                rejection.status(),
                ErrorResponse {
                    error: rejection.body_text(),
                    raw_response: None,
                },
            ),
            AppError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "url is required".to_string(),
                    raw_response: None,
                },
            ),
            AppError::Audit(AuditError::InvalidUrl(message)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: format!("Invalid URL: {}", message),
                    raw_response: None,
                },
            ),
            AppError::Audit(AuditError::Schema { message, raw }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: format!("Model output failed validation: {}", message),
                    raw_response: Some(raw),
                },
            ),
            AppError::Audit(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: err.to_string(),
                    raw_response: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuditError> for AppError {
    fn from(e: AuditError) -> Self {
        AppError::Audit(e)
    }
}

/// POST /analyze - run one audit pipeline for the given URL.
async fn analyze<C, M>(
    State(state): State<AppState<C, M>>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError>
where
    C: ContentSource + Send + Sync + 'static,
    M: ReviewModel + Send + Sync + 'static,
    C::Error: Display,
    M::Error: Display,
{
    let Json(request) = request.map_err(AppError::BadBody)?;
    let url = request.url.ok_or(AppError::MissingUrl)?;

    let result = state.auditor.analyze(&url).await;

    // Thread real outcomes into the connectivity snapshot. A schema
    // failure still means the model service answered.
    match &result {
        Ok(_) => {
            state.connectivity.record_model(true);
            state.connectivity.record_db(true);
        }
        Err(AuditError::ModelConnection(_)) => state.connectivity.record_model(false),
        Err(AuditError::Schema { .. }) => state.connectivity.record_model(true),
        Err(AuditError::Store(_)) => state.connectivity.record_db(false),
        Err(_) => {}
    }

    let outcome = result.map_err(|e| {
        error!("Analysis failed for {}: {}", url, e);
        AppError::Audit(e)
    })?;

    Ok(Json(AnalyzeResponse {
        scraped_data: outcome.summary,
        review: outcome.record.review,
    }))
}

/// GET /reviews - up to five persisted reviews, most recent first.
async fn list_reviews<C, M>(
    State(state): State<AppState<C, M>>,
) -> Result<Json<Vec<PersistedReview>>, AppError>
where
    C: ContentSource + Send + Sync + 'static,
    M: ReviewModel + Send + Sync + 'static,
{
    let reviews = {
        let store = state
            .store
            .lock()
            .map_err(|e| AppError::Audit(AuditError::Internal(e.to_string())))?;
        store
            .list_recent(RETENTION_WINDOW)
            .map_err(|e| AppError::Audit(AuditError::Store(e.to_string())))?
    };

    Ok(Json(reviews))
}

/// GET /health - status reporter snapshot. Never fails.
async fn health<C, M>(State(state): State<AppState<C, M>>) -> Json<StatusSnapshot>
where
    C: ContentSource + Send + Sync + 'static,
    M: ReviewModel + Send + Sync + 'static,
{
    Json(status::report(&state.connectivity, state.started_at))
}

/// Create the axum router with all routes
pub fn create_router<C, M>(state: AppState<C, M>) -> Router
where
    C: ContentSource + Send + Sync + 'static,
    M: ReviewModel + Send + Sync + 'static,
    C::Error: Display,
    M::Error: Display,
{
    Router::new()
        .route("/analyze", post(analyze::<C, M>))
        .route("/reviews", get(list_reviews::<C, M>))
        .route("/health", get(health::<C, M>))
        .with_state(state)
}
