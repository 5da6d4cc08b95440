//! The request logger
//!
//! [`RequestLogger`] is cheap to clone and shared by every request.
//! [`RequestLogger::begin`] emits the entry line and returns a
//! [`PendingRequest`]; finishing it consumes it, so the completion
//! line can be emitted at most once.

use crate::core::config::LoggerConfig;
use crate::core::context::RequestContext;
use crate::core::error::Result;
use crate::core::line::{finished_line, incoming_line, LogLine};
use crate::core::sink::{ConsoleSink, FileSink, LogSink};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configured request logger
#[derive(Clone)]
pub struct RequestLogger {
    config: Arc<LoggerConfig>,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RequestLogger {
    /// Validate `config` and pick the console or file sink
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let sink: Arc<dyn LogSink> = if config.log_to_file {
            Arc::new(FileSink::new(config.log_file_path.clone()))
        } else {
            Arc::new(ConsoleSink::new())
        };

        Self::with_sink(config, sink)
    }

    /// Use a caller-provided sink instead of the configured one
    pub fn with_sink(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            sink,
        })
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Start tracking a request
    ///
    /// Records the start time, then writes the entry line if
    /// `log_incoming` is set. A sink failure is returned and the
    /// request is not tracked.
    pub fn begin(&self, ctx: RequestContext) -> Result<PendingRequest> {
        let started = Instant::now();

        if self.config.log_incoming {
            self.emit(&incoming_line(&self.config, &ctx))?;
        }

        Ok(PendingRequest {
            logger: self.clone(),
            ctx,
            started,
        })
    }

    fn emit(&self, line: &LogLine) -> Result<()> {
        self.sink.write_line(&line.to_string())
    }
}

/// A request whose completion line has not been written yet
#[derive(Debug)]
pub struct PendingRequest {
    logger: RequestLogger,
    ctx: RequestContext,
    started: Instant,
}

impl PendingRequest {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Write the completion line using the time since [`RequestLogger::begin`]
    pub fn finish(self, status: u16) -> Result<()> {
        let elapsed = self.elapsed();
        self.finish_with_elapsed(status, elapsed)
    }

    /// Write the completion line with an explicit elapsed time
    ///
    /// Nothing is written when every completion field is disabled.
    pub fn finish_with_elapsed(self, status: u16, elapsed: Duration) -> Result<()> {
        if !self.logger.config.logs_completion() {
            return Ok(());
        }
        let line = finished_line(&self.logger.config, &self.ctx, status, elapsed);
        self.logger.emit(&line)
    }
}
