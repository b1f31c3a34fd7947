//! Groq provider implementation
//!
//! Talks to Groq's OpenAI-compatible chat completions API. The request is
//! sent with a low temperature to bias toward deterministic,
//! schema-conformant output; that is a request parameter, not a
//! guarantee, and the validator downstream must not trust it.

use crate::ModelError;
use pagelens_domain::traits::ReviewModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Groq API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model served by Groq
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default timeout for completion requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Sampling temperature for review completions
const TEMPERATURE: f32 = 0.3;

/// Groq chat-completions client
pub struct GroqModel {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl GroqModel {
    /// Create a new Groq client.
    ///
    /// # Parameters
    ///
    /// - `api_key`: Groq API key (bearer token)
    /// - `model`: model name, e.g. [`DEFAULT_MODEL`]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ModelError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model)
    }

    /// Create a client against a non-default endpoint (useful for tests
    /// against a local stub server).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ModelError::Other(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    fn status_error(status: reqwest::StatusCode, body: String) -> ModelError {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            ModelError::Auth(format!("HTTP {}: {}", status, body))
        } else {
            ModelError::Connection(format!("HTTP {}: {}", status, body))
        }
    }
}

impl ReviewModel for GroqModel {
    type Error = ModelError;

    fn complete(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!("Requesting completion from {} ({})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.trim())
            .json(&body)
            .send()
            .map_err(|e| ModelError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Self::status_error(status, text));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("empty choices array".to_string()))
    }

    fn check(&self) -> Result<(), Self::Error> {
        let url = format!("{}/models", self.endpoint);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.trim())
            .send()
            .map_err(|e| ModelError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Self::status_error(status, text));
        }

        Ok(())
    }
}
