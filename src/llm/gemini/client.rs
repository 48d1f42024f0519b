//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::llm::core::{config::GenerationConfig, error::LlmError, provider::LlmProvider};

use super::mapper::{from_gemini_error, from_gemini_response, to_gemini_request};
use super::types::GenerateContentResponse;

/// Client for the Gemini `generateContent` endpoint, authenticated by API key
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Model, credential, and endpoint; shared with the rest of the process
    config: Arc<ProviderConfig>,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// No network access happens here; the credential is only read when a
    /// request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. TLS backend failure).
    pub fn new(config: Arc<ProviderConfig>) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Build the endpoint URL for the configured model
    fn build_endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, LlmError> {
        let request = to_gemini_request(prompt, config);
        let url = self.build_endpoint_url();

        debug!(model = %self.config.model, prompt_len = prompt.len(), "Calling Gemini");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_gemini_error(status.as_u16(), body));
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        from_gemini_response(parsed)
    }
}
