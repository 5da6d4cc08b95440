//! Configuration management for the request logger.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with defaults matching the middleware's
//! documented behavior: method, path, status and duration on; client
//! IP, user agent and file output off.

use crate::core::error::{LoggerError, Result};
use http::HeaderName;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Demo server configuration (used by `reqlog serve`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Request logger configuration
///
/// Built once per middleware instance and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggerConfig {
    /// Emit a line when a request arrives
    #[serde(default = "default_true")]
    pub log_incoming: bool,

    /// Include the response status code in the completion line
    #[serde(default = "default_true")]
    pub log_status_code: bool,

    /// Include the elapsed time in the completion line
    #[serde(default = "default_true")]
    pub log_duration: bool,

    #[serde(default = "default_true")]
    pub log_method: bool,

    /// Include the request path (with query) in both lines
    #[serde(default = "default_true")]
    pub log_path: bool,

    /// Include the client IP in the entry line
    #[serde(default)]
    pub log_ip: bool,

    /// Include the raw User-Agent header in the entry line
    #[serde(default)]
    pub log_user_agent: bool,

    /// Append plain lines to `log_file_path` instead of printing
    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default = "default_log_file_path")]
    pub log_file_path: PathBuf,

    /// Forwarding header set by a trusted proxy
    #[serde(default = "default_ip_header")]
    pub ip_header: String,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_file_path() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("logs.txt")
}

fn default_ip_header() -> String {
    "x-forwarded-for".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_incoming: true,
            log_status_code: true,
            log_duration: true,
            log_method: true,
            log_path: true,
            log_ip: false,
            log_user_agent: false,
            log_to_file: false,
            log_file_path: default_log_file_path(),
            ip_header: default_ip_header(),
        }
    }
}

impl LoggerConfig {
    /// True when at least one completion-line field is enabled
    pub fn logs_completion(&self) -> bool {
        self.log_method || self.log_path || self.log_status_code || self.log_duration
    }

    /// Validate logger settings
    pub fn validate(&self) -> Result<()> {
        if HeaderName::from_bytes(self.ip_header.as_bytes()).is_err() {
            return Err(LoggerError::ConfigError(format!(
                "ip_header is not a valid header name: {:?}",
                self.ip_header
            )));
        }

        if self.log_to_file {
            if self.log_file_path.as_os_str().is_empty() {
                return Err(LoggerError::ConfigError(
                    "log_file_path must be set when log_to_file is enabled".to_string(),
                ));
            }

            if self.log_file_path.is_dir() {
                return Err(LoggerError::ConfigError(format!(
                    "log_file_path is a directory: {}",
                    self.log_file_path.display()
                )));
            }
        }

        Ok(())
    }
}

/// Parse a boolean override, rejecting anything but true/false/1/0
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(LoggerError::ConfigError(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}

/// Location of the per-user config file
///
/// `$XDG_CONFIG_HOME/reqlog/config.toml`, falling back to the
/// platform config directory and finally `~/.config`.
pub fn user_config_file() -> PathBuf {
    let base = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });

    base.join("reqlog").join("config.toml")
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LoggerError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File lookup order:
    /// 1. REQLOG_CONFIG env var
    /// 2. User config file (~/.config/reqlog/config.toml)
    /// 3. ./reqlog.toml
    /// 4. Defaults
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("REQLOG_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let user_config = user_config_file();
            if user_config.exists() {
                Self::from_file(user_config)?
            } else if Path::new("reqlog.toml").exists() {
                Self::from_file("reqlog.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    ///
    /// A malformed override is an error, never silently skipped.
    pub fn merge_env(&mut self) -> Result<()> {
        // Server configuration
        if let Ok(host) = env::var("REQLOG_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("REQLOG_PORT") {
            self.server.port = port.parse().map_err(|_| {
                LoggerError::ConfigError(format!("REQLOG_PORT is not a valid port: {port:?}"))
            })?;
        }

        // Logger flags
        let logger = &mut self.logger;
        let flags: [(&str, &mut bool); 8] = [
            ("REQLOG_LOG_INCOMING", &mut logger.log_incoming),
            ("REQLOG_LOG_STATUS_CODE", &mut logger.log_status_code),
            ("REQLOG_LOG_DURATION", &mut logger.log_duration),
            ("REQLOG_LOG_METHOD", &mut logger.log_method),
            ("REQLOG_LOG_PATH", &mut logger.log_path),
            ("REQLOG_LOG_IP", &mut logger.log_ip),
            ("REQLOG_LOG_USER_AGENT", &mut logger.log_user_agent),
            ("REQLOG_LOG_TO_FILE", &mut logger.log_to_file),
        ];
        for (key, flag) in flags {
            if let Ok(value) = env::var(key) {
                *flag = parse_bool(key, &value)?;
            }
        }

        if let Ok(path) = env::var("REQLOG_LOG_FILE") {
            logger.log_file_path = PathBuf::from(path);
        }
        if let Ok(header) = env::var("REQLOG_IP_HEADER") {
            logger.ip_header = header;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(LoggerError::ConfigError(
                "Server host must not be empty".to_string(),
            ));
        }

        self.logger.validate()
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Log incoming: {}", self.logger.log_incoming);
        tracing::info!("  Log method: {}", self.logger.log_method);
        tracing::info!("  Log path: {}", self.logger.log_path);
        tracing::info!("  Log status code: {}", self.logger.log_status_code);
        tracing::info!("  Log duration: {}", self.logger.log_duration);
        tracing::info!("  Log IP: {} (header: {})", self.logger.log_ip, self.logger.ip_header);
        tracing::info!("  Log user agent: {}", self.logger.log_user_agent);
        if self.logger.log_to_file {
            tracing::info!("  Sink: file {:?}", self.logger.log_file_path);
        } else {
            tracing::info!("  Sink: console");
        }
    }
}
