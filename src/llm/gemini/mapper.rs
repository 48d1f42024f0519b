//! Mapping between abstraction types and Gemini types

use crate::llm::core::{config::GenerationConfig, error::LlmError};

use super::types::{
    Content, ErrorResponse, GeminiGenerationConfig, GenerateContentRequest,
    GenerateContentResponse, Part,
};

/// Wrap a flattened prompt as a single user turn
pub fn to_gemini_request(prompt: &str, config: &GenerationConfig) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: to_gemini_generation_config(config),
    }
}

/// Convert generation config to Gemini's format, omitting it when empty
fn to_gemini_generation_config(config: &GenerationConfig) -> Option<GeminiGenerationConfig> {
    if config.is_empty() {
        return None;
    }

    Some(GeminiGenerationConfig {
        max_output_tokens: config.max_output_tokens,
        temperature: config.temperature,
    })
}

/// Extract the text of the first candidate
///
/// A response with no text is an error: either the prompt was blocked or the
/// candidate stopped before producing anything.
pub fn from_gemini_response(response: GenerateContentResponse) -> Result<String, LlmError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(LlmError::EmptyResponse(format!(
            "prompt was blocked (reason: {})",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyResponse("no candidates returned".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(LlmError::EmptyResponse(format!(
            "candidate has no text (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

/// Turn a non-2xx response into an error, preferring Gemini's own envelope
pub fn from_gemini_error(status: u16, body: String) -> LlmError {
    if status == 429 {
        return LlmError::RateLimitExceeded { retry_after: None };
    }

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(envelope) if !envelope.error.message.is_empty() => LlmError::ProviderError {
            code: if envelope.error.status.is_empty() {
                status.to_string()
            } else {
                envelope.error.status
            },
            message: envelope.error.message,
        },
        _ => LlmError::HttpError { status, body },
    }
}
