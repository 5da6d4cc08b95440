//! HTTP adapter
//!
//! Depends only on core/. Wires the request logger into axum as a
//! middleware function and provides the demo handlers used by
//! `reqlog serve`.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::{log_request, LoggedBody};

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::core::logger::RequestLogger;

/// Build the demo router with the logging middleware installed
pub fn demo_router(logger: RequestLogger) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/echo", post(echo_handler))
        .route("/status/{code}", get(status_handler).post(status_handler))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn_with_state(logger, log_request))
                .layer(CorsLayer::permissive()),
        )
}
