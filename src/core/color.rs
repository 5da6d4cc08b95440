//! Color coding for log lines
//!
//! Methods and status codes are classified into small enums, the enums
//! map to a [`ColorToken`], and only [`ColorToken::paint`] knows which
//! escape sequence a token becomes. Console output goes through
//! `colored`, so `NO_COLOR`, `CLICOLOR_FORCE` and TTY detection apply.

use colored::{ColoredString, Colorize};
use once_cell::sync::Lazy;
use regex::Regex;

/// SGR escape sequences (`ESC [ ... m`)
static COLOR_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;]*m").expect("color code pattern is valid")
});

/// HTTP method families that get their own color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Get,
    Post,
    Put,
    Delete,
    Other,
}

impl MethodKind {
    /// Classify a method token. Matching is exact: methods are
    /// case-sensitive in HTTP.
    pub fn from_method(method: &str) -> Self {
        match method {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            _ => Self::Other,
        }
    }
}

/// Status code classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirection,
    ClientError,
    ServerError,
    Other,
}

impl StatusClass {
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => Self::Success,
            300..=399 => Self::Redirection,
            400..=499 => Self::ClientError,
            500.. => Self::ServerError,
            _ => Self::Other,
        }
    }
}

/// Named colors used in log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Green,
    Yellow,
    Blue,
    Red,
    BoldRed,
    White,
    /// Highlight for durations
    Accent,
}

impl ColorToken {
    /// Render `text` with this token's escape sequence
    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Green => text.truecolor(128, 255, 128),
            Self::Yellow => text.truecolor(255, 255, 128),
            Self::Blue => text.truecolor(128, 128, 255),
            Self::Red => text.truecolor(255, 128, 128),
            Self::BoldRed => text.bold().truecolor(255, 128, 128),
            Self::White => text.truecolor(255, 255, 255),
            Self::Accent => text.yellow(),
        }
    }
}

pub fn method_color(kind: MethodKind) -> ColorToken {
    match kind {
        MethodKind::Get => ColorToken::Green,
        MethodKind::Post => ColorToken::Yellow,
        MethodKind::Put => ColorToken::Blue,
        MethodKind::Delete => ColorToken::BoldRed,
        MethodKind::Other => ColorToken::White,
    }
}

pub fn status_color(class: StatusClass) -> ColorToken {
    match class {
        StatusClass::Success => ColorToken::Green,
        StatusClass::Redirection => ColorToken::Blue,
        StatusClass::ClientError => ColorToken::Yellow,
        StatusClass::ServerError => ColorToken::Red,
        StatusClass::Other => ColorToken::White,
    }
}

pub fn path_color() -> ColorToken {
    ColorToken::White
}

pub fn duration_color() -> ColorToken {
    ColorToken::Accent
}

/// Remove every color escape sequence from `line`
///
/// Idempotent: a stripped line has nothing left to strip.
pub fn strip_color_codes(line: &str) -> String {
    COLOR_CODE.replace_all(line, "").into_owned()
}
