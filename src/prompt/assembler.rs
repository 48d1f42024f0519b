//! Builds the final prompt and generation options for each endpoint

use std::borrow::Cow;

use crate::llm::GenerationConfig;
use crate::models::{Message, MessageRole};

use super::normalizer::normalize_messages;

/// System text for single-shot questions
pub const ASK_SYSTEM_PROMPT: &str = "You are an expert exoplanet science educator. \
Answer questions about exoplanets, detection methods \
(transit, radial velocity, microlensing, direct imaging), \
space missions (Kepler, TESS, JWST), and astronomy clearly. \
Keep answers concise but informative and scientifically accurate.";

/// System text injected into conversations that don't bring their own
pub const CHAT_SYSTEM_PROMPT: &str = "You are an expert exoplanet science educator. \
Help users learn about exoplanets, their detection, \
characterization, and the missions that discover them. \
Explain concepts like the transit method, radial velocity, \
habitable zones, and planetary atmospheres. \
Be accurate, engaging, and educational.";

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Output ceiling for chat replies; requests cannot raise it
pub const CHAT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Cue appended to chat prompts so the model answers as the assistant
const REPLY_CUE: &str = "Assistant: ";

/// A prompt ready for the provider, with its request-scoped options
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrompt {
    pub text: String,
    pub options: GenerationConfig,
}

/// Ask-mode: system text, then optional context and question blocks
///
/// Both parts may be empty; the result is then the system text alone.
pub fn build_ask_prompt(context: &str, question: &str) -> AssembledPrompt {
    let mut user_prompt = String::new();
    if !context.is_empty() {
        user_prompt.push_str("Context:\n");
        user_prompt.push_str(context);
        user_prompt.push_str("\n\n");
    }
    if !question.is_empty() {
        user_prompt.push_str("Question: ");
        user_prompt.push_str(question);
    }

    AssembledPrompt {
        text: format!("{}\n\n{}", ASK_SYSTEM_PROMPT, user_prompt),
        options: GenerationConfig::new(),
    }
}

/// Chat-mode: ensure a system instruction, flatten, and cue the reply
pub fn build_chat_prompt(messages: &[Message], temperature: Option<f64>) -> AssembledPrompt {
    let has_system = messages.iter().any(|m| m.role == MessageRole::System);

    let conversation: Cow<'_, [Message]> = if has_system {
        Cow::Borrowed(messages)
    } else {
        let mut with_default = Vec::with_capacity(messages.len() + 1);
        with_default.push(Message::system(CHAT_SYSTEM_PROMPT));
        with_default.extend_from_slice(messages);
        Cow::Owned(with_default)
    };

    let mut text = normalize_messages(&conversation);
    text.push_str(REPLY_CUE);

    AssembledPrompt {
        text,
        options: GenerationConfig::new()
            .with_temperature(effective_temperature(temperature))
            .with_max_output_tokens(CHAT_MAX_OUTPUT_TOKENS),
    }
}

/// Missing or zero temperature falls back to the default
fn effective_temperature(requested: Option<f64>) -> f64 {
    match requested {
        Some(t) if t != 0.0 => t,
        _ => DEFAULT_TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_prompt_with_context_and_question() {
        let prompt = build_ask_prompt("TRAPPIST-1 is a red dwarf", "How many planets orbit it?");

        assert!(prompt.text.starts_with(ASK_SYSTEM_PROMPT));
        assert!(prompt.text.ends_with(
            "Context:\nTRAPPIST-1 is a red dwarf\n\nQuestion: How many planets orbit it?"
        ));
        assert!(prompt.options.is_empty());
    }

    #[test]
    fn test_ask_prompt_question_only() {
        let prompt = build_ask_prompt("", "What is TESS?");
        assert_eq!(
            prompt.text,
            format!("{}\n\nQuestion: What is TESS?", ASK_SYSTEM_PROMPT)
        );
    }

    #[test]
    fn test_ask_prompt_context_only() {
        let prompt = build_ask_prompt("Kepler-452b", "");
        assert_eq!(
            prompt.text,
            format!("{}\n\nContext:\nKepler-452b\n\n", ASK_SYSTEM_PROMPT)
        );
    }

    #[test]
    fn test_ask_prompt_empty_inputs_is_system_text() {
        let prompt = build_ask_prompt("", "");
        assert!(!prompt.text.is_empty());
        assert_eq!(prompt.text.trim_end(), ASK_SYSTEM_PROMPT);
    }

    #[test]
    fn test_chat_prompt_injects_default_system() {
        let messages = vec![Message::user("What is a transit?")];
        let prompt = build_chat_prompt(&messages, None);

        assert_eq!(
            prompt.text,
            format!(
                "{}\n\nUser: What is a transit?\nAssistant: ",
                CHAT_SYSTEM_PROMPT
            )
        );
        assert_eq!(prompt.text.matches(CHAT_SYSTEM_PROMPT).count(), 1);
    }

    #[test]
    fn test_chat_prompt_keeps_caller_system() {
        let messages = vec![
            Message::system("You are terse."),
            Message::user("Define albedo."),
        ];
        let prompt = build_chat_prompt(&messages, Some(0.3));

        assert_eq!(prompt.text, "You are terse.\n\nUser: Define albedo.\nAssistant: ");
        assert!(!prompt.text.contains(CHAT_SYSTEM_PROMPT));
    }

    #[test]
    fn test_chat_prompt_uses_last_of_several_systems() {
        let messages = vec![
            Message::system("old instructions"),
            Message::user("Hi"),
            Message::system("new instructions"),
        ];
        let prompt = build_chat_prompt(&messages, None);

        assert!(prompt.text.starts_with("new instructions\n\n"));
        assert!(!prompt.text.contains("old instructions"));
        assert!(!prompt.text.contains(CHAT_SYSTEM_PROMPT));
    }

    #[test]
    fn test_chat_prompt_empty_messages() {
        let prompt = build_chat_prompt(&[], None);
        assert_eq!(prompt.text, format!("{}\n\nAssistant: ", CHAT_SYSTEM_PROMPT));
    }

    #[test]
    fn test_chat_options_default_temperature() {
        let prompt = build_chat_prompt(&[Message::user("hi")], None);
        assert_eq!(prompt.options.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(prompt.options.max_output_tokens, Some(CHAT_MAX_OUTPUT_TOKENS));
    }

    #[test]
    fn test_chat_options_zero_temperature_falls_back() {
        let prompt = build_chat_prompt(&[Message::user("hi")], Some(0.0));
        assert_eq!(prompt.options.temperature, Some(DEFAULT_TEMPERATURE));
    }

    #[test]
    fn test_chat_options_explicit_temperature_unclamped() {
        let prompt = build_chat_prompt(&[Message::user("hi")], Some(1.9));
        assert_eq!(prompt.options.temperature, Some(1.9));

        let prompt = build_chat_prompt(&[Message::user("hi")], Some(3.5));
        assert_eq!(prompt.options.temperature, Some(3.5));
        assert_eq!(prompt.options.max_output_tokens, Some(CHAT_MAX_OUTPUT_TOKENS));
    }
}
