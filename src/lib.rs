//! reqlog - HTTP request/response logging middleware
//!
//! Records method, path, status code, duration and optionally client
//! IP and user agent for every request, writing to the console with
//! ANSI colors or appending plain lines to a file.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (framework-agnostic)
//!   - config, error, context, color, line, sink, logger
//!
//! - **http**: axum adapter (depends on core)
//!   - middleware, error mapping, demo handlers
//!
//! - **cli**: clap adapter for the `reqlog` binary
//!
//! # Usage
//!
//! ```no_run
//! use axum::{middleware, routing::get, Router};
//! use reqlog::{http::log_request, LoggerConfig, RequestLogger};
//!
//! # fn build() -> reqlog::Result<Router> {
//! let logger = RequestLogger::new(LoggerConfig {
//!     log_ip: true,
//!     ..LoggerConfig::default()
//! })?;
//!
//! let app = Router::new()
//!     .route("/health", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(logger, log_request));
//! # Ok(app)
//! # }
//! ```

// Core domain logic (framework-agnostic)
pub mod core;

// HTTP (axum) adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::{Config, LoggerConfig};
pub use core::context::{client_ip, RequestContext};
pub use core::error::{LoggerError, Result};
pub use core::logger::{PendingRequest, RequestLogger};
pub use core::sink::{ConsoleSink, FileSink, LogSink};
