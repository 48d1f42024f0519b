// JSON reply helpers shared by the handlers

use serde::Serialize;
use tracing::warn;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::error::GatewayError;
use crate::models::ErrorBody;

pub fn json_ok<T: Serialize>(body: &T) -> Response {
    warp::reply::with_status(warp::reply::json(body), StatusCode::OK).into_response()
}

pub fn detail(status: StatusCode, detail: impl Into<String>) -> Response {
    let body = ErrorBody {
        detail: detail.into(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Render a failed request as `{detail}` with the status for its kind
pub fn gateway_error(err: &GatewayError) -> Response {
    let status = err.status_code();
    warn!(kind = err.kind(), status = status.as_u16(), "Request failed");
    detail(status, err.to_string())
}
