//! Request/response logging at the HTTP boundary.
//!
//! Every request is logged when it arrives (method, URL) and when its response leaves
//! (status, latency). With `log_bodies` the headers and both bodies are logged too, at
//! the same level; that requires buffering the bodies, so it is opt-in per configuration.

use std::time::Instant;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

/// Upper bound for buffered bodies.
const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct RequestLogging {
    pub bodies: bool,
}

fn body_text(bytes: &Bytes) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

pub async fn request_logger(
    State(settings): State<RequestLogging>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();
    info!(%method, %uri, "--- Request ---");

    let req = if settings.bodies {
        let (parts, body) = req.into_parts();
        let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%method, %uri, error = %e, "Failed to read request body");
                return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
            }
        };
        info!(headers = ?parts.headers, body = %body_text(&bytes), "Request detail");
        Request::from_parts(parts, Body::from(bytes))
    } else {
        req
    };

    let response = next.run(req).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if !settings.bodies {
        info!(%method, %uri, status = status.as_u16(), latency_ms, "--- Response ---");
        return response;
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => {
            info!(%method, %uri, status = status.as_u16(), latency_ms, "--- Response ---");
            info!(body = %body_text(&bytes), "Response detail");
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(%method, %uri, error = %e, "Failed to read response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
