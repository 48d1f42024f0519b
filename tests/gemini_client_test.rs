//! Gemini client tests against a local mock HTTP server

use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

use exoplanet_ai::config::ProviderConfig;
use exoplanet_ai::llm::{GeminiClient, GenerationConfig, LlmError, LlmProvider};

const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn client_for(base_url: &str) -> GeminiClient {
    let config = Arc::new(ProviderConfig {
        model: "gemini-1.5-flash".to_string(),
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
    });
    GeminiClient::new(config).expect("Failed to create Gemini client")
}

#[tokio::test]
async fn test_generate_sends_prompt_and_options() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"role": "user", "parts": [{"text": "User: hi\nAssistant: "}]}],
            "generationConfig": {"temperature": 0.5, "maxOutputTokens": 2048}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there."}]},"finishReason":"STOP"}]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server.url());
    let options = GenerationConfig::new()
        .with_temperature(0.5)
        .with_max_output_tokens(2048);

    let text = assert_ok!(client.generate("User: hi\nAssistant: ", &options).await);
    assert_eq!(text, "Hello there.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_without_options_omits_config() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_body(Matcher::Regex(r#"^\{"contents":\[.*\]\}$"#.to_string()))
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let text = assert_ok!(client.generate("question", &GenerationConfig::new()).await);
    assert_eq!(text, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_error_envelope() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .with_status(400)
        .with_body(
            r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = assert_err!(client.generate("hi", &GenerationConfig::new()).await);

    match &err {
        LlmError::ProviderError { code, message } => {
            assert_eq!(code, "INVALID_ARGUMENT");
            assert!(message.contains("API key not valid"));
        }
        other => panic!("Expected provider error, got {:?}", other),
    }
    assert!(err.is_generation_failure());
}

#[tokio::test]
async fn test_rate_limited() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = assert_err!(client.generate("hi", &GenerationConfig::new()).await);
    assert!(matches!(err, LlmError::RateLimitExceeded { .. }));
}

#[tokio::test]
async fn test_blocked_prompt() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = assert_err!(client.generate("hi", &GenerationConfig::new()).await);
    assert!(matches!(err, LlmError::EmptyResponse(_)));
    assert!(err.is_generation_failure());
}

#[tokio::test]
async fn test_undecodable_body_is_not_a_generation_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body("<html>proxy error</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = assert_err!(client.generate("hi", &GenerationConfig::new()).await);
    assert!(matches!(err, LlmError::SerializationError(_)));
    assert!(!err.is_generation_failure());
}

#[tokio::test]
async fn test_connection_refused() {
    // Port 1 on loopback is reserved and closed
    let client = client_for("http://127.0.0.1:1");
    let err = assert_err!(client.generate("hi", &GenerationConfig::new()).await);
    assert!(matches!(err, LlmError::ConnectionError(_)));
    assert!(err.is_generation_failure());
}
