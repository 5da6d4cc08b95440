//! Integration tests for the axum logging middleware
//!
//! Drives a router with `oneshot` and checks what reaches the sink:
//! both lines per request, completion only after the body is done,
//! exactly once even when the body is dropped unread.

use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use bytes::Bytes;
use http_body::Frame;
use reqlog::http::{self, log_request, HealthResponse};
use reqlog::{LogSink, LoggerConfig, RequestLogger};
use tower::ServiceExt as TowerServiceExt;

use crate::common::{CaptureSink, FailingSink};

/// Create a test application logging into `sink`
fn create_test_app(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Router {
    let logger = RequestLogger::with_sink(config, sink).unwrap();
    http::demo_router(logger)
}

/// Yields one chunk, then fails
struct BrokenBody {
    sent: bool,
}

impl http_body::Body for BrokenBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, io::Error>>> {
        if self.sent {
            return Poll::Ready(Some(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "upstream closed",
            ))));
        }
        self.sent = true;
        Poll::Ready(Some(Ok(Frame::data(Bytes::from_static(b"partial")))))
    }
}

fn with_ip() -> LoggerConfig {
    LoggerConfig {
        log_ip: true,
        ..LoggerConfig::default()
    }
}

#[tokio::test]
async fn test_health_request_logs_two_lines() {
    let sink = CaptureSink::new();
    let app = create_test_app(with_ip(), sink.clone());

    let peer: SocketAddr = "10.0.0.1:52100".parse().unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .extension(ConnectInfo(peer))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // Entry line is written before the handler runs, completion waits for the body
    assert_eq!(sink.lines().len(), 1);

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "ok");

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "GET /health from 10.0.0.1 Incoming request");
    assert!(lines[1].starts_with("GET /health 200 "));
    assert!(lines[1].ends_with(" seconds"));
}

#[tokio::test]
async fn test_forwarded_header_wins_over_peer() {
    let sink = CaptureSink::new();
    let app = create_test_app(with_ip(), sink.clone());

    let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-forwarded-for", "203.0.113.5, 70.41.3.18")
                .extension(ConnectInfo(peer))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    drop(response);

    assert!(sink.lines()[0].contains("from 203.0.113.5 "));
}

#[tokio::test]
async fn test_unknown_ip_without_connect_info() {
    let sink = CaptureSink::new();
    let app = create_test_app(with_ip(), sink.clone());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    drop(response);

    assert!(sink.lines()[0].contains("from Unknown IP "));
}

#[tokio::test]
async fn test_completion_fires_once_when_body_dropped() {
    let sink = CaptureSink::new();
    let app = create_test_app(LoggerConfig::default(), sink.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .body(Body::from("hello"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(sink.lines().len(), 1);
    drop(response);

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("POST /echo 200 "));
}

#[tokio::test]
async fn test_status_and_query_are_logged() {
    let sink = CaptureSink::new();
    let app = create_test_app(LoggerConfig::default(), sink.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status/404?reason=missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();

    let lines = sink.lines();
    assert_eq!(lines[0], "GET /status/404?reason=missing Incoming request");
    assert!(lines[1].starts_with("GET /status/404?reason=missing 404 "));
}

#[tokio::test]
async fn test_unmatched_path_is_logged() {
    let sink = CaptureSink::new();
    let app = create_test_app(LoggerConfig::default(), sink.clone());

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    drop(response);

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "GET /nope Incoming request");
    assert!(lines[1].starts_with("GET /nope 404 "));
}

#[tokio::test]
async fn test_cors_preflight_is_logged() {
    let sink = CaptureSink::new();
    let app = create_test_app(LoggerConfig::default(), sink.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/echo")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
    drop(response);

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "OPTIONS /echo Incoming request");
    assert!(lines[1].starts_with("OPTIONS /echo 200 "));
}

#[tokio::test]
async fn test_body_error_completes_once() {
    let sink = CaptureSink::new();
    let logger = RequestLogger::with_sink(LoggerConfig::default(), sink.clone()).unwrap();

    let app = Router::new()
        .route(
            "/stream",
            get(|| async { Body::new(BrokenBody { sent: false }) }),
        )
        .layer(middleware::from_fn_with_state(logger, log_request));

    let response = app
        .oneshot(Request::builder().uri("/stream").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(sink.lines().len(), 1);

    let result = axum::body::to_bytes(response.into_body(), 10_000).await;
    assert!(result.is_err());

    // The error completed the request; dropping the body afterwards adds nothing
    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("GET /stream 200 "));
}

#[tokio::test]
async fn test_method_not_allowed_is_logged() {
    let sink = CaptureSink::new();
    let app = create_test_app(LoggerConfig::default(), sink.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    drop(response);

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("DELETE /health 405 "));
}

#[tokio::test]
async fn test_nested_router_logs_original_path() {
    let sink = CaptureSink::new();
    let logger = RequestLogger::with_sink(LoggerConfig::default(), sink.clone()).unwrap();

    let api = Router::new().route("/ping", get(|| async { "pong" }));
    let app = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(logger, log_request));

    let response = app
        .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    drop(response);

    assert_eq!(sink.lines()[0], "GET /api/ping Incoming request");
}

#[tokio::test]
async fn test_entry_line_failure_becomes_500() {
    let app = create_test_app(LoggerConfig::default(), Arc::new(FailingSink));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("disk full"));
    assert_eq!(error["status"], 500);
}

#[tokio::test]
async fn test_completion_failure_does_not_affect_response() {
    let config = LoggerConfig {
        log_incoming: false,
        ..LoggerConfig::default()
    };
    let app = create_test_app(config, Arc::new(FailingSink));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    assert!(!body.is_empty());
}
