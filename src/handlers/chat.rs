// POST /api/chat handler

use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::llm::ProviderClient;
use crate::models::{ChatRequest, ChatResponse, Message};
use crate::prompt::build_chat_prompt;

use super::reply;

pub const MESSAGES_SHAPE_ERROR: &str = "messages must be a list of {role, content}";

pub async fn chat_handler(
    body: Value,
    client: Arc<ProviderClient>,
) -> Result<warp::reply::Response, Infallible> {
    let span = info_span!("chat", request_id = %Uuid::new_v4());

    let outcome = async {
        let request = parse_chat_request(body)?;
        reply_to(request, &client).await
    }
    .instrument(span)
    .await;

    Ok(match outcome {
        Ok(response) => reply::json_ok(&response),
        Err(err) => reply::gateway_error(&err),
    })
}

/// Validate the body shape; runs before the provider is involved
pub fn parse_chat_request(mut body: Value) -> Result<ChatRequest, GatewayError> {
    let object = body
        .as_object_mut()
        .ok_or_else(|| GatewayError::BadRequest("request body must be a JSON object".to_string()))?;

    let messages = match object.remove("messages") {
        Some(raw @ Value::Array(_)) => serde_json::from_value::<Vec<Message>>(raw)
            .map_err(|_| GatewayError::BadRequest(MESSAGES_SHAPE_ERROR.to_string()))?,
        _ => return Err(GatewayError::BadRequest(MESSAGES_SHAPE_ERROR.to_string())),
    };

    let temperature = match object.remove("temperature") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(
            serde_json::from_value::<f64>(raw)
                .map_err(|_| GatewayError::BadRequest("temperature must be a number".to_string()))?,
        ),
    };

    Ok(ChatRequest {
        messages,
        temperature,
    })
}

async fn reply_to(request: ChatRequest, client: &ProviderClient) -> Result<ChatResponse, GatewayError> {
    info!(
        messages = request.messages.len(),
        temperature = ?request.temperature,
        "POST /api/chat"
    );

    let prompt = build_chat_prompt(&request.messages, request.temperature);
    let reply = client.generate(&prompt.text, &prompt.options).await?;

    Ok(ChatResponse {
        reply,
        model: client.model().to_string(),
        provider: client.provider_name().to_string(),
    })
}
