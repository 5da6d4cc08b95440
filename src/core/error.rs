//! Error types for the request logger.
//!
//! Configuration problems and sink I/O failures are the only error
//! sources. Header values never fail a request; absent or malformed
//! headers degrade to placeholder text instead.

use thiserror::Error;

/// Result type alias for logger operations
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Main error type for the request logger
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LoggerError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error came from the configuration layer
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            LoggerError::ConfigError(_) | LoggerError::TomlError(_)
        )
    }

    /// Check if this error came from writing a log line
    pub fn is_io(&self) -> bool {
        matches!(self, LoggerError::IoError(_))
    }
}
