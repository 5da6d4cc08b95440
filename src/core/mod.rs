//! Core domain logic (framework-agnostic)
//!
//! Everything needed to turn a request into log lines and write them
//! somewhere, without depending on a particular web framework.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **context**: Per-request fields and client IP derivation
//! - **color**: Method/status color mapping and escape stripping
//! - **line**: Log line construction and duration formatting
//! - **sink**: Console and file destinations
//! - **logger**: The request logger and its one-shot completion handle

pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod line;
pub mod logger;
pub mod sink;

// Re-export key types for convenience
pub use config::{Config, LoggerConfig};
pub use error::{LoggerError, Result};
pub use logger::{PendingRequest, RequestLogger};
