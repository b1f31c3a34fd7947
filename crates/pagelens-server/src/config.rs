//! Environment-driven configuration for the server.
//!
//! The deployment surface provides the listening port, the database
//! path, and the model-service credentials through environment
//! variables; everything else has defaults.

use pagelens_llm::groq::DEFAULT_MODEL;
use std::env;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// An environment variable has an unusable value
    #[error("Invalid value for {0}: {1}")]
    InvalidVar(String, String),
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    pub bind_port: u16,

    /// SQLite database path
    pub database_path: String,

    /// Groq API key
    pub groq_api_key: String,

    /// Groq model name
    pub groq_model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PAGELENS_BIND` — bind address, default `0.0.0.0`
    /// - `PORT` — listening port, default `5000`
    /// - `PAGELENS_DB` — database path, default `pagelens.db`
    /// - `GROQ_API_KEY` — required
    /// - `GROQ_MODEL` — default [`DEFAULT_MODEL`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_address = env::var("PAGELENS_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let bind_port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidVar("PORT".to_string(), e.to_string()))?,
            Err(_) => 5000,
        };

        let database_path = env::var("PAGELENS_DB").unwrap_or_else(|_| "pagelens.db".to_string());

        let groq_api_key = env::var("GROQ_API_KEY")
            .map_err(|_| ConfigError::MissingVar("GROQ_API_KEY".to_string()))?;
        if groq_api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("GROQ_API_KEY".to_string()));
        }

        let groq_model = env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            bind_address,
            bind_port,
            database_path,
            groq_api_key,
            groq_model,
        })
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
            database_path: ":memory:".to_string(),
            groq_api_key: "test-key-do-not-use".to_string(),
            groq_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.groq_model, DEFAULT_MODEL);
    }
}
