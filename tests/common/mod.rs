use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use exoplanet_ai::config::ProviderConfig;
use exoplanet_ai::llm::{GenerationConfig, LlmError, LlmProvider, ProviderClient};

pub const TEST_MODEL: &str = "gemini-1.5-flash";
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// What the fake provider should do when called
#[derive(Clone)]
pub enum Behavior {
    Reply(String),
    Connection(String),
    Undecodable(String),
}

/// In-process stand-in for Gemini that records every call
pub struct FakeProvider {
    behavior: Behavior,
    calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl FakeProvider {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> (String, GenerationConfig) {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), config.clone()));

        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Connection(msg) => Err(LlmError::ConnectionError(msg.clone())),
            Behavior::Undecodable(msg) => Err(LlmError::SerializationError(msg.clone())),
        }
    }
}

pub fn provider_config(api_key: &str) -> Arc<ProviderConfig> {
    Arc::new(ProviderConfig {
        model: TEST_MODEL.to_string(),
        api_key: api_key.to_string(),
        base_url: "http://127.0.0.1:9".to_string(),
    })
}

pub fn provider_client(api_key: &str, provider: &Arc<FakeProvider>) -> Arc<ProviderClient> {
    let provider: Arc<dyn LlmProvider> = provider.clone();
    Arc::new(ProviderClient::new(provider_config(api_key), Some(provider)))
}

pub fn allowlist() -> Vec<String> {
    vec![TEST_ORIGIN.to_string()]
}
