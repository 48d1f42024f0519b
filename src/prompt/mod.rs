//! Prompt assembly for a provider without structured multi-turn roles

pub mod assembler;
pub mod normalizer;

pub use assembler::{build_ask_prompt, build_chat_prompt, AssembledPrompt};
pub use normalizer::normalize_messages;
