//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{FromRequest, Request},
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION, request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::Error;

/// The maximum number of bytes of a body that is logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body accepted, the same as axum's default body limit.
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body logged at the `debug` level.
///
/// The `password` field of JSON request bodies and the value of the
/// `Authorization` header are never logged. Bodies are passed on byte for
/// byte, and requests with bodies larger than [MAX_REQUEST_BODY_SIZE] are
/// rejected with [Error::PayloadTooLarge].
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_request_body(body).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => return error.into_response(),
    };
    log_request(&parts, &redact_password(&String::from_utf8_lossy(&body_bytes)));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Buffer a request body of at most [MAX_REQUEST_BODY_SIZE] bytes.
async fn read_request_body(body: Body) -> Result<Bytes, Error> {
    // A fresh request carries no `DefaultBodyLimit`, so the extractor falls
    // back to axum's default limit.
    Bytes::from_request(Request::new(body), &())
        .await
        .map_err(Error::from)
}

/// Replace the value of a top level `password` field in a JSON object.
///
/// Text that is not a JSON object is returned unchanged.
fn redact_password(body_text: &str) -> String {
    match serde_json::from_str::<Value>(body_text) {
        Ok(Value::Object(mut object)) if object.contains_key("password") => {
            object.insert("password".to_owned(), Value::String(REDACTED.to_owned()));
            Value::Object(object).to_string()
        }
        _ => body_text.to_owned(),
    }
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();

    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }

    headers
}

/// Cut `body` down to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(body.len());

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(parts: &request::Parts, body: &str) {
    let method = &parts.method;
    let uri = &parts.uri;
    let headers = redact_headers(&parts.headers);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {method} {uri} {headers:?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {method} {uri} {headers:?}\nbody: {body:?}");
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    let status = parts.status;

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {status} {:?}\nbody: {:}...",
            parts.headers,
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!(
            "Sending response: {status} {:?}\nbody: {body:?}",
            parts.headers
        );
    }
}
