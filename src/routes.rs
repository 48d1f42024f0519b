// Route definitions, shared state, and rejection handling

use bytes::Buf;
use futures_util::{pin_mut, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::Filter;

use crate::handlers;
use crate::handlers::reply;
use crate::llm::ProviderClient;

/// Largest request body accepted on the JSON endpoints
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

#[derive(Debug)]
struct BodyTooLarge;

impl Reject for BodyTooLarge {}

#[derive(Debug)]
struct InvalidBody(String);

impl Reject for InvalidBody {}

pub fn configure_routes(
    client: Arc<ProviderClient>,
    cors_allowlist: &[String],
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    let api = warp::path("api");

    // GET /
    let service_info = warp::path::end()
        .and(warp::get())
        .and_then(handlers::service_info_handler);

    // GET /api/health
    let health = api
        .and(warp::path("health"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // POST /api/ask
    let ask = api
        .and(warp::path("ask"))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with_client(client.clone()))
        .and_then(handlers::ask_handler);

    // POST /api/chat
    // The body is taken as raw JSON so a malformed `messages` gets our own 400.
    let chat = api
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<serde_json::Value>())
        .and(with_client(client))
        .and_then(handlers::chat_handler);

    let app = service_info
        .or(health)
        .or(ask)
        .or(chat)
        .recover(handle_rejection);

    // Listed origins get CORS headers. Any other origin is still served,
    // just without them, and the browser enforces the policy.
    let cross_origin = listed_origin(cors_allowlist).and(
        app.clone()
            .with(build_cors(cors_allowlist))
            .recover(handle_rejection),
    );

    cross_origin.or(app).with(warp::log::custom(|info| {
        info!(
            method = %info.method(),
            path = info.path(),
            status = info.status().as_u16(),
            elapsed_ms = info.elapsed().as_millis() as u64,
            "request"
        );
    }))
}

fn with_client(
    client: Arc<ProviderClient>,
) -> impl Filter<Extract = (Arc<ProviderClient>,), Error = Infallible> + Clone {
    warp::any().map(move || client.clone())
}

/// Passes requests with no `Origin` header or with one from the allow-list
fn listed_origin(
    allowlist: &[String],
) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    let allowlist: Arc<[String]> = allowlist.into();

    warp::header::optional::<String>("origin")
        .and_then(move |origin: Option<String>| {
            let allowlist = allowlist.clone();
            async move {
                match origin {
                    Some(origin) if !origin_allowed(&allowlist, &origin) => {
                        debug!(origin = %origin, "Origin not in allow-list, serving without CORS headers");
                        Err(warp::reject())
                    }
                    _ => Ok(()),
                }
            }
        })
        .untuple_one()
}

fn origin_allowed(allowlist: &[String], origin: &str) -> bool {
    allowlist
        .iter()
        .any(|allowed| allowed == "*" || allowed == origin)
}

fn build_cors(allowlist: &[String]) -> warp::cors::Builder {
    let cors = warp::cors()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "accept"])
        .allow_credentials(true);

    if allowlist.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        cors.allow_origins(allowlist.iter().map(String::as_str))
    }
}

/// JSON request body capped at [`MAX_BODY_BYTES`]
///
/// A declared `Content-Length` over the cap is refused up front; bodies
/// without one (chunked) are counted as they arrive.
fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::header::optional::<u64>("content-length")
        .and(warp::body::stream())
        .and_then(|declared: Option<u64>, body| async move {
            if declared.is_some_and(|length| length > MAX_BODY_BYTES) {
                return Err(warp::reject::custom(BodyTooLarge));
            }

            let raw = read_limited(body, MAX_BODY_BYTES).await?;

            serde_json::from_slice::<T>(&raw).map_err(|e| {
                debug!(error = %e, "Request body is not valid JSON");
                warp::reject::custom(InvalidBody(e.to_string()))
            })
        })
}

/// Collect a body stream, giving up as soon as it passes `limit` bytes
async fn read_limited<S, B, E>(body: S, limit: u64) -> Result<Vec<u8>, warp::Rejection>
where
    S: Stream<Item = Result<B, E>>,
    B: Buf,
    E: fmt::Display,
{
    pin_mut!(body);
    let mut buffer = Vec::new();

    while let Some(chunk) = body.next().await {
        let mut chunk = chunk.map_err(|e| warp::reject::custom(InvalidBody(e.to_string())))?;

        if (buffer.len() + chunk.remaining()) as u64 > limit {
            return Err(warp::reject::custom(BodyTooLarge));
        }

        while chunk.has_remaining() {
            let part = chunk.chunk();
            let len = part.len();
            buffer.extend_from_slice(part);
            chunk.advance(len);
        }
    }

    Ok(buffer)
}

/// Turn every rejection into a `{detail}` JSON response
pub async fn handle_rejection(
    err: warp::Rejection,
) -> Result<warp::reply::Response, Infallible> {
    let response = if err.is_not_found() {
        reply::detail(StatusCode::NOT_FOUND, "Not Found")
    } else if let Some(InvalidBody(cause)) = err.find::<InvalidBody>() {
        reply::detail(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", cause))
    } else if err.find::<BodyTooLarge>().is_some() {
        reply::detail(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if let Some(e) = err.find::<warp::cors::CorsForbidden>() {
        reply::detail(StatusCode::FORBIDDEN, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        reply::detail(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        error!(rejection = ?err, "Unhandled rejection");
        reply::detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            crate::error::UNEXPECTED_MESSAGE,
        )
    };

    Ok(response)
}
