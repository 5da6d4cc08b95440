//! HTTP mapping for logger errors
//!
//! A logger error reaching axum is always a server-side fault (the log
//! sink failed), never something the client did.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::LoggerError;

impl LoggerError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for LoggerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        tracing::error!(error = %self, "Request logger failed");

        let body = Json(json!({
            "error": self.message(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
