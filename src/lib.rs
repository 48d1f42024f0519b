// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod routes;

// Configuration and request errors
pub mod config;
pub mod error;

// Prompt normalization and assembly
pub mod prompt;

// LLM abstraction layer
pub mod llm;
