//! Log line destinations
//!
//! The console sink prints lines as rendered. The file sink strips
//! color codes and appends to a plain text file, opening and closing
//! the file for every line.

use crate::core::color::strip_color_codes;
use crate::core::error::Result;
use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// First line of every log file
pub const FILE_HEADER: &str = "Log file created";

/// Destination for rendered log lines
pub trait LogSink: Send + Sync {
    /// Write one line; the sink adds the line terminator
    fn write_line(&self, line: &str) -> Result<()>;
}

/// Writes lines as rendered, escape sequences included
///
/// Standard output by default; any writer can stand in for it.
#[derive(Debug)]
pub struct ConsoleSink<W = Stdout> {
    out: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> LogSink for ConsoleSink<W> {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

/// Appends plain lines to a file
///
/// The header goes in front of the first line written to a missing or
/// empty file, so a first write that failed is retried with the header.
/// Appends from this process are serialized, and each one is a single
/// `write_all`.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let plain = strip_color_codes(line);
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let entry = if file.metadata()?.len() == 0 {
            format!("{FILE_HEADER}\n{plain}\n")
        } else {
            format!("{plain}\n")
        };
        file.write_all(entry.as_bytes())?;

        Ok(())
    }
}
