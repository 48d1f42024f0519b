//! Request-level error taxonomy

use thiserror::Error;
use warp::http::StatusCode;

pub const API_KEY_HINT: &str =
    "GOOGLE_API_KEY missing. Get it from https://aistudio.google.com/app/apikey";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Every way a gateway request can fail
///
/// The `Display` text is exactly what the caller receives as `detail`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Operator error: credential, model, or provider capability missing
    #[error("{0}")]
    Configuration(String),

    /// Malformed request shape; the provider is never called
    #[error("{0}")]
    BadRequest(String),

    /// The provider failed while processing the prompt
    #[error("AI generation error: {0}")]
    Generation(String),

    /// Anything else; details stay in the server log
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Configuration(_)
            | GatewayError::Generation(_)
            | GatewayError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Configuration(_) => "configuration",
            GatewayError::BadRequest(_) => "bad_request",
            GatewayError::Generation(_) => "generation",
            GatewayError::Unexpected => "unexpected",
        }
    }
}
