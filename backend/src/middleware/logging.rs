use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    http::{header::CONTENT_LENGTH, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::request_id::RequestId;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 2048;

/// Logs every 4xx/5xx response with its request id, latency and a preview of
/// the body. Bodies of known length up to `MAX_BUFFERED_BODY_BYTES` are
/// buffered for the preview; larger or streamed bodies pass through as is.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let latency_ms = start.elapsed().as_millis() as u64;
    let (mut parts, body) = response.into_parts();
    let (body, preview) = match buffered_len(&parts.headers, &body) {
        Some(len) if len <= MAX_BUFFERED_BODY_BYTES as u64 => {
            match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
                Ok(bytes) => {
                    let preview = preview(&bytes);
                    (Body::from(bytes), preview)
                }
                Err(err) => {
                    parts.headers.remove(CONTENT_LENGTH);
                    (Body::empty(), format!("<unreadable body: {}>", err))
                }
            }
        }
        Some(len) => (body, format!("<not buffered, {} bytes>", len)),
        None => (body, "<not buffered, unknown length>".to_string()),
    };

    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            method = %method,
            uri = %uri,
            request_id = %request_id,
            latency_ms,
            body = %preview,
            "Request failed"
        );
    } else if status != StatusCode::NOT_FOUND {
        tracing::warn!(
            status = status.as_u16(),
            method = %method,
            uri = %uri,
            request_id = %request_id,
            latency_ms,
            body = %preview,
            "Request rejected"
        );
    } else {
        tracing::debug!(
            status = status.as_u16(),
            method = %method,
            uri = %uri,
            request_id = %request_id,
            "Not found"
        );
    }

    Response::from_parts(parts, body)
}

/// Exact body length when the response announces one.
fn buffered_len(headers: &HeaderMap, body: &Body) -> Option<u64> {
    let hint = body.size_hint();
    if hint.upper() == Some(hint.lower()) {
        return Some(hint.lower());
    }
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

fn preview(bytes: &Bytes) -> String {
    if bytes.len() > MAX_LOGGED_BODY_BYTES {
        format!(
            "{}... (truncated, {} bytes total)",
            String::from_utf8_lossy(&bytes[..MAX_LOGGED_BODY_BYTES]),
            bytes.len()
        )
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}
