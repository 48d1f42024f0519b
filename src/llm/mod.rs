//! LLM abstraction layer
//!
//! A narrow `LlmProvider` capability, the Gemini implementation of it, and
//! the `ProviderClient` that every request goes through.

pub mod client;
pub mod core;
pub mod gemini;

pub use client::{ProviderClient, PROVIDER_NAME};
pub use self::core::{config::GenerationConfig, error::LlmError, provider::LlmProvider};
pub use gemini::GeminiClient;
