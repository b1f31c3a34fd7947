//! Pagelens Server
//!
//! HTTP surface for the UX audit pipeline: `POST /analyze`,
//! `GET /reviews`, and `GET /health`, wired over the extractor, the Groq
//! model client, and the SQLite retention store.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod status;

use config::ServerConfig;
use handlers::{create_router, AppState};
use pagelens_auditor::Auditor;
use pagelens_domain::traits::{ReviewModel, ReviewStore};
use pagelens_extractor::{ContentExtractor, ExtractorConfig};
use pagelens_llm::GroqModel;
use pagelens_store::SqliteStore;
use status::Connectivity;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed to initialize a subsystem
    #[error("Initialization error: {0}")]
    Init(String),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the audit HTTP server.
///
/// Opens the store, builds the extractor and model client, runs the
/// startup connectivity checks, and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Pagelens server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Model: {}", config.groq_model);

    let store = SqliteStore::open(&config.database_path)
        .map_err(|e| ServerError::Init(e.to_string()))?;
    let store = Arc::new(Mutex::new(store));

    // Blocking HTTP clients are built and probed off the async workers.
    let (extractor, model, model_ok) = {
        let api_key = config.groq_api_key.clone();
        let model_name = config.groq_model.clone();
        tokio::task::spawn_blocking(
            move || -> Result<(ContentExtractor, GroqModel, bool), ServerError> {
                let extractor = ContentExtractor::new(ExtractorConfig::default())
                    .map_err(|e| ServerError::Init(e.to_string()))?;
                let model = GroqModel::new(api_key, model_name)
                    .map_err(|e| ServerError::Init(e.to_string()))?;
                let model_ok = model.check().is_ok();
                Ok((extractor, model, model_ok))
            },
        )
        .await
        .map_err(|e| ServerError::Init(e.to_string()))??
    };

    // Startup connectivity checks; /health reflects these until the
    // first analyze call records fresher outcomes.
    let connectivity = Arc::new(Connectivity::new());
    match store.lock() {
        Ok(guard) => {
            let ok = guard.ping().is_ok();
            connectivity.record_db(ok);
            if ok {
                info!("Store connectivity check passed");
            } else {
                warn!("Store connectivity check failed");
            }
        }
        Err(_) => connectivity.record_db(false),
    }
    connectivity.record_model(model_ok);
    if model_ok {
        info!("Model connectivity check passed");
    } else {
        warn!("Model connectivity check failed; /health will report Disconnected");
    }

    let auditor = Auditor::new(extractor, model, Arc::clone(&store));

    let state = AppState {
        auditor: Arc::new(auditor),
        store,
        connectivity,
        started_at: Instant::now(),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
