//! Demo request handlers
//!
//! A handful of endpoints for `reqlog serve`, enough to see every
//! method and status color in the log output.

use axum::{
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Echo handler: responds with the request body unchanged
pub async fn echo_handler(body: Bytes) -> impl IntoResponse {
    body
}

/// Respond with the status code given in the path
///
/// Unknown or out-of-range codes get a 400.
pub async fn status_handler(Path(code): Path<u16>) -> impl IntoResponse {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, status.canonical_reason().unwrap_or_default().to_string()),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            format!("invalid status code: {code}"),
        ),
    }
}
