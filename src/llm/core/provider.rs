//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{config::GenerationConfig, error::LlmError};

/// The opaque text-generation capability behind the gateway
///
/// Implementations make exactly one call to the model per invocation and
/// return its text. Retrying is left to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a flattened prompt
    ///
    /// # Arguments
    /// * `prompt` - The full prompt text, system instruction included
    /// * `config` - Sampling options; unset fields use provider defaults
    ///
    /// # Returns
    /// The model's text response, or an error if the call fails
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, LlmError>;
}
