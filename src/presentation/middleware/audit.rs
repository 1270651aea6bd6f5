//! API Call Audit Middleware
//!
//! Captures every `/api` exchange and hands the record to the audit queue.
//!
//! Client-supplied values are clipped to their column widths so a long header
//! or subject can never make the insert fail.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{self, Body, Bytes},
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use http_body_util::LengthLimitError;
use uuid::Uuid;

use super::auth::bearer_token;
use crate::domain::ApiCallRecord;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Appended to bodies cut at the configured length
pub const TRUNCATION_SUFFIX: &str = "... [truncated]";

/// Width of `api_call_history.client_ip`
pub const MAX_CLIENT_IP_CHARS: usize = 45;

/// Width of `api_call_history.user_identifier`
pub const MAX_USER_CHARS: usize = 100;

/// Width of `api_call_history.http_method`
pub const MAX_METHOD_CHARS: usize = 10;

/// Record the request and response, then submit them for persistence.
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Utc::now();
    let timer = Instant::now();
    let max_chars = state.settings.audit.max_body_chars;
    let max_bytes = state.settings.audit.max_request_bytes;

    let method = clip(request.method().to_string(), MAX_METHOD_CHARS);
    let path = request.uri().path().to_string();
    let client_ip = client_ip(
        request.headers(),
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr),
    )
    .map(|ip| clip(ip, MAX_CLIENT_IP_CHARS));
    let user_agent = header_str(request.headers(), header::USER_AGENT.as_str());
    let user_identifier = bearer_token(request.headers())
        .and_then(|token| state.tokens.verify(&token).ok())
        .map(|claims| clip(claims.sub, MAX_USER_CHARS));

    let (request, request_body) = if is_json(request.headers()) {
        if declared_length(request.headers()).is_some_and(|len| len > max_bytes) {
            return too_large(max_bytes);
        }

        let (parts, body) = request.into_parts();
        let bytes = match body::to_bytes(body, max_bytes).await {
            Ok(bytes) => bytes,
            Err(e) if is_length_limit(&e) => return too_large(max_bytes),
            Err(e) => {
                tracing::warn!(error = %e, path = %path, "Failed to read request body");
                return AppError::BadRequest("Failed to read request body".into()).into_response();
            }
        };
        let captured = body_text(&bytes, max_chars);
        (Request::from_parts(parts, Body::from(bytes)), captured)
    } else {
        (request, None)
    };

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = match body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Failed to read response body");
            return AppError::Internal(e.to_string()).into_response();
        }
    };
    let response_body = body_text(&bytes, max_chars);
    let response = Response::from_parts(parts, Body::from(bytes));

    let record = ApiCallRecord {
        id: Uuid::new_v4(),
        timestamp: started_at,
        api_endpoint: path,
        http_method: method,
        user_identifier,
        response_status: i32::from(response.status().as_u16()),
        request_duration_ms: i64::try_from(timer.elapsed().as_millis()).ok(),
        client_ip,
        user_agent,
        request_body,
        response_body,
    };
    state.audit.submit(record);

    response
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn is_length_limit(error: &axum::Error) -> bool {
    std::error::Error::source(error).is_some_and(|source| source.is::<LengthLimitError>())
}

fn too_large(max_bytes: usize) -> Response {
    AppError::PayloadTooLarge(format!("Request body exceeds {} bytes", max_bytes)).into_response()
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// First `X-Forwarded-For` entry, else `X-Real-IP`, else the peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

fn body_text(bytes: &Bytes, max_chars: usize) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    Some(truncate_body(&String::from_utf8_lossy(bytes), max_chars))
}

/// Keep at most `max_chars` characters of `value`.
pub fn clip(mut value: String, max_chars: usize) -> String {
    if let Some((cut, _)) = value.char_indices().nth(max_chars) {
        value.truncate(cut);
    }
    value
}

/// Cut `body` after `max_chars` characters and mark the cut.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &body[..cut], TRUNCATION_SUFFIX),
        None => body.to_string(),
    }
}
