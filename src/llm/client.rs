//! Provider client: configuration gate, single-shot call, failure classification

use std::sync::Arc;
use tracing::{error, warn};

use crate::config::ProviderConfig;
use crate::error::{GatewayError, API_KEY_HINT};

use super::core::{config::GenerationConfig, error::LlmError, provider::LlmProvider};

/// Display name reported to callers alongside every answer
pub const PROVIDER_NAME: &str = "Google Gemini";

/// Wraps the provider capability with the checks every request needs
pub struct ProviderClient {
    config: Arc<ProviderConfig>,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl ProviderClient {
    /// `provider` is `None` when the capability could not be constructed at startup
    pub fn new(config: Arc<ProviderConfig>, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { config, provider }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// Fail fast on operator errors, before anything touches the network
    fn ready_provider(&self) -> Result<&Arc<dyn LlmProvider>, GatewayError> {
        if !self.config.has_credential() {
            warn!("Rejecting request: GOOGLE_API_KEY is not configured");
            return Err(GatewayError::Configuration(API_KEY_HINT.to_string()));
        }

        if self.config.model.trim().is_empty() {
            warn!("Rejecting request: GEMINI_MODEL is empty");
            return Err(GatewayError::Configuration(
                "GEMINI_MODEL is empty. Set it to a Gemini model name such as gemini-1.5-flash"
                    .to_string(),
            ));
        }

        self.provider.as_ref().ok_or_else(|| {
            GatewayError::Configuration(
                "Gemini provider is unavailable. Check the server logs from startup".to_string(),
            )
        })
    }

    /// Send one prompt to the provider and return its text
    ///
    /// Called exactly once per request; there is no retry.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationConfig,
    ) -> Result<String, GatewayError> {
        let provider = self.ready_provider()?;

        provider
            .generate(prompt, options)
            .await
            .map_err(classify)
    }
}

/// Sort a provider failure into the two buckets callers can see
fn classify(err: LlmError) -> GatewayError {
    if err.is_generation_failure() {
        warn!(error = %err, "AI generation failed");
        GatewayError::Generation(err.to_string())
    } else {
        error!(error = ?err, "Unexpected error while calling provider");
        GatewayError::Unexpected
    }
}
