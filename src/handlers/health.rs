// GET /api/health and GET / handlers

use std::convert::Infallible;

use crate::llm::PROVIDER_NAME;
use crate::models::{HealthResponse, ServiceInfo};

use super::reply;

pub async fn health_handler() -> Result<warp::reply::Response, Infallible> {
    Ok(reply::json_ok(&HealthResponse {
        ok: true,
        ai_provider: PROVIDER_NAME.to_string(),
    }))
}

pub async fn service_info_handler() -> Result<warp::reply::Response, Infallible> {
    Ok(reply::json_ok(&ServiceInfo {
        service: "exoplanet-ai-backend".to_string(),
        ai_provider: PROVIDER_NAME.to_string(),
        health: "/api/health".to_string(),
    }))
}
