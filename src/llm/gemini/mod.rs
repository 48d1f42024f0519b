//! Gemini provider implementation
//!
//! This module provides a client for Google's Gemini models via the
//! Generative Language API, implementing the LlmProvider trait.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::GeminiClient;
