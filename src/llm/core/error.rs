//! Error types for the LLM layer

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling an LLM provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider rejected the request parameters before or during the call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request failures (non-2xx responses)
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// Transport-level failures: DNS, connect, TLS, reset connections
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded (retry after {retry_after:?})")]
    RateLimitExceeded { retry_after: Option<Duration> },

    /// Provider-specific errors reported in the response body
    #[error("Provider error ({code}): {message}")]
    ProviderError { code: String, message: String },

    /// The provider answered but produced no usable text (blocked prompt, safety stop)
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Faults inside this process while driving the provider call
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LlmError {
    /// Whether this failure came from the provider's attempt to process the prompt.
    ///
    /// Everything else is treated as unexpected and is not described to callers.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            LlmError::InvalidRequest(_)
                | LlmError::HttpError { .. }
                | LlmError::ConnectionError(_)
                | LlmError::RateLimitExceeded { .. }
                | LlmError::ProviderError { .. }
                | LlmError::EmptyResponse(_)
        )
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            LlmError::HttpError {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else if err.is_decode() {
            LlmError::SerializationError(err.to_string())
        } else {
            LlmError::ConnectionError(err.to_string())
        }
    }
}
