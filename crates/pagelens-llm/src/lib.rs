//! Pagelens Model Layer
//!
//! Review model client implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `ReviewModel` trait from
//! `pagelens-domain`. The client is a capability that accepts a system
//! instruction and a user prompt and returns raw completion text; the
//! validator downstream never trusts its shape.
//!
//! # Providers
//!
//! - `MockModel`: Deterministic mock for testing
//! - `GroqModel`: Groq's OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use pagelens_llm::MockModel;
//! use pagelens_domain::traits::ReviewModel;
//!
//! let model = MockModel::new("{\"ux_score\": 80}");
//! let text = model.complete("system", "prompt").unwrap();
//! assert_eq!(text, "{\"ux_score\": 80}");
//! ```

#![warn(missing_docs)]

pub mod groq;

use pagelens_domain::traits::ReviewModel;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use groq::GroqModel;

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or API communication error
    #[error("Model connection error: {0}")]
    Connection(String),

    /// Authentication or authorization failure
    #[error("Model auth error: {0}")]
    Auth(String),

    /// Response envelope could not be decoded
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}

/// Mock review model for deterministic testing
///
/// Returns pre-configured completions without network calls. Prompts can
/// be keyed to specific responses, and failure can be injected to
/// simulate an unreachable model service.
#[derive(Debug, Clone)]
pub struct MockModel {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    fail_connection: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockModel {
    /// Create a mock that returns a fixed completion for all prompts.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            fail_connection: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every call fails with a connection error.
    pub fn unreachable() -> Self {
        Self {
            default_response: String::new(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            fail_connection: true,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific completion for a given prompt.
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Number of times complete was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl ReviewModel for MockModel {
    type Error = ModelError;

    fn complete(&self, _system: &str, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.fail_connection {
            return Err(ModelError::Connection("mock connection refused".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }

    fn check(&self) -> Result<(), Self::Error> {
        if self.fail_connection {
            return Err(ModelError::Connection("mock connection refused".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_response() {
        let model = MockModel::new("fixed");
        assert_eq!(model.complete("sys", "anything").unwrap(), "fixed");
    }

    #[test]
    fn test_mock_keyed_responses() {
        let mut model = MockModel::new("default");
        model.add_response("hello", "world");

        assert_eq!(model.complete("sys", "hello").unwrap(), "world");
        assert_eq!(model.complete("sys", "other").unwrap(), "default");
    }

    #[test]
    fn test_mock_call_count() {
        let model = MockModel::new("x");
        assert_eq!(model.call_count(), 0);

        model.complete("sys", "a").unwrap();
        model.complete("sys", "b").unwrap();
        assert_eq!(model.call_count(), 2);
    }

    #[test]
    fn test_mock_unreachable() {
        let model = MockModel::unreachable();
        let result = model.complete("sys", "prompt");
        assert!(matches!(result, Err(ModelError::Connection(_))));
        assert!(model.check().is_err());
    }

    #[test]
    fn test_mock_clone_shares_call_count() {
        let a = MockModel::new("x");
        let b = a.clone();

        a.complete("sys", "p").unwrap();
        assert_eq!(b.call_count(), 1);
    }
}
