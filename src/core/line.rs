//! Log line construction
//!
//! A line is built segment by segment from the enabled fields, then
//! rendered once. Segments are joined by a single space.

use crate::core::color::{
    duration_color, method_color, path_color, status_color, ColorToken, MethodKind, StatusClass,
};
use crate::core::config::LoggerConfig;
use crate::core::context::RequestContext;
use std::fmt;
use std::time::Duration;

/// Literal that closes every entry line
pub const INCOMING_MARKER: &str = "Incoming request";

/// One piece of a log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Colored(String, ColorToken),
}

/// A log line, rendered with color through [`fmt::Display`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogLine {
    segments: Vec<Segment>,
}

impl LogLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_plain(&mut self, text: impl Into<String>) {
        self.segments.push(Segment::Plain(text.into()));
    }

    pub fn push_colored(&mut self, text: impl Into<String>, color: ColorToken) {
        self.segments.push(Segment::Colored(text.into(), color));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render without any escape sequences
    pub fn to_plain(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Plain(text) | Segment::Colored(text, _) => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match segment {
                Segment::Plain(text) => f.write_str(text)?,
                Segment::Colored(text, color) => write!(f, "{}", color.paint(text))?,
            }
        }
        Ok(())
    }
}

/// Format an elapsed time as `S.mmm seconds`
///
/// Millisecond precision: sub-millisecond time is truncated.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_millis() as f64 / 1000.0;
    format!("{secs:.3} seconds")
}

fn push_method_and_path(line: &mut LogLine, config: &LoggerConfig, ctx: &RequestContext) {
    if config.log_method {
        let color = method_color(MethodKind::from_method(&ctx.method));
        line.push_colored(ctx.method.as_str(), color);
    }
    if config.log_path {
        line.push_colored(ctx.path.as_str(), path_color());
    }
}

/// Build the line emitted when a request arrives
pub fn incoming_line(config: &LoggerConfig, ctx: &RequestContext) -> LogLine {
    let mut line = LogLine::new();
    push_method_and_path(&mut line, config, ctx);

    if config.log_ip {
        line.push_plain(format!("from {}", ctx.client_ip));
    }
    if config.log_user_agent {
        let ua = ctx.user_agent.as_deref().unwrap_or_default();
        line.push_plain(format!("(User-Agent: {ua})"));
    }

    line.push_plain(INCOMING_MARKER);
    line
}

/// Build the line emitted when the response completes
///
/// Empty when every completion field is disabled.
pub fn finished_line(
    config: &LoggerConfig,
    ctx: &RequestContext,
    status: u16,
    elapsed: Duration,
) -> LogLine {
    let mut line = LogLine::new();
    push_method_and_path(&mut line, config, ctx);

    if config.log_status_code {
        let color = status_color(StatusClass::from_code(status));
        line.push_colored(status.to_string(), color);
    }
    if config.log_duration {
        line.push_colored(format_duration(elapsed), duration_color());
    }

    line
}
