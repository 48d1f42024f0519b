// POST /api/ask handler

use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::llm::ProviderClient;
use crate::models::{AskRequest, AskResponse};
use crate::prompt::build_ask_prompt;

use super::reply;

pub async fn ask_handler(
    request: AskRequest,
    client: Arc<ProviderClient>,
) -> Result<warp::reply::Response, Infallible> {
    let span = info_span!("ask", request_id = %Uuid::new_v4());

    let outcome = answer(request, &client).instrument(span).await;

    Ok(match outcome {
        Ok(response) => reply::json_ok(&response),
        Err(err) => reply::gateway_error(&err),
    })
}

async fn answer(request: AskRequest, client: &ProviderClient) -> Result<AskResponse, GatewayError> {
    let context = request.context.unwrap_or_default();
    let question = request.question.unwrap_or_default();
    info!(
        context_len = context.len(),
        question_len = question.len(),
        "POST /api/ask"
    );

    let prompt = build_ask_prompt(&context, &question);
    let answer = client.generate(&prompt.text, &prompt.options).await?;

    Ok(AskResponse {
        answer,
        model: client.model().to_string(),
        provider: client.provider_name().to_string(),
    })
}
