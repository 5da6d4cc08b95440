//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use serde::Serialize;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for enabled flags
    pub fn enabled(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }
}

/// Format a boolean flag as on/off
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Format a boolean flag with color (dim when off)
pub fn format_flag_colored(value: bool) -> String {
    let text = format_flag(value);
    if value {
        colors::enabled(text).to_string()
    } else {
        colors::dim(text).to_string()
    }
}

/// Render a value as pretty-printed JSON
pub fn to_json<T: Serialize>(data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

/// Print a value as pretty-printed JSON
pub fn print_json<T: Serialize>(data: &T) -> serde_json::Result<()> {
    println!("{}", to_json(data)?);
    Ok(())
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
