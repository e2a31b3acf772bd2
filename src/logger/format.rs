//! Access log format module
//!
//! Lines follow the Common Log Format prefix used by simple development
//! servers, without a size field:
//! `127.0.0.1 - - [17/Oct/2026 14:03:22] "GET /index.html HTTP/1.1" 200 -`
//!
//! The whole line is wrapped in an ANSI color chosen by status class.

use chrono::Local;

pub const GREEN: &str = "\x1b[92m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
/// Also used as the reset suffix
pub const DEFAULT: &str = "\x1b[0m";

/// What happened, for one log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A response was produced for this request line
    Completed { request_line: String, status: u16 },
    /// An error page is about to be sent
    Error { status: u16, message: String },
}

/// One access log line
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Client IP address (no port)
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub event: LogEvent,
}

impl LogRecord {
    pub fn completed(remote_addr: String, request_line: String, status: u16) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            event: LogEvent::Completed {
                request_line,
                status,
            },
        }
    }

    pub fn error(remote_addr: String, status: u16, message: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            event: LogEvent::Error { status, message },
        }
    }

    /// Plain line without color codes
    pub fn format(&self) -> String {
        let time = self.time.format("%d/%b/%Y %H:%M:%S");
        match &self.event {
            LogEvent::Completed {
                request_line,
                status,
            } => format!(
                "{} - - [{time}] \"{request_line}\" {status} -",
                self.remote_addr
            ),
            LogEvent::Error { status, message } => format!(
                "{} - - [{time}] code {status}, message {message}",
                self.remote_addr
            ),
        }
    }

    /// Color prefix for this line; error notes keep the default color
    pub const fn color(&self) -> &'static str {
        match &self.event {
            LogEvent::Completed { status, .. } => status_color(*status),
            LogEvent::Error { .. } => DEFAULT,
        }
    }

    /// Line wrapped in its color and the reset code
    pub fn colorized(&self) -> String {
        format!("{}{}{DEFAULT}", self.color(), self.format())
    }
}

/// Pick the ANSI color for a status code
///
/// Only exactly 200 is green; other 2xx and 1xx codes stay uncolored.
pub const fn status_color(status: u16) -> &'static str {
    match status {
        200 => GREEN,
        300..=399 => YELLOW,
        400..=599 => RED,
        _ => DEFAULT,
    }
}
