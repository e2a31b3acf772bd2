//! Logger module
//!
//! Provides logging utilities for the development server:
//! - Startup banner and shutdown notices
//! - Colorized access log through the `AccessLog` trait
//! - Error and warning logging to stderr

pub mod format;

pub use format::{status_color, LogEvent, LogRecord};

use crate::config::ServerConfig;
use std::io::Write;

/// Sink for completed-request log lines
pub trait AccessLog: Send + Sync {
    fn record(&self, record: &LogRecord);
}

/// Writes colorized access lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLog;

impl AccessLog for ConsoleLog {
    fn record(&self, record: &LogRecord) {
        write_info(&record.colorized());
    }
}

/// Write to stdout; a closed or broken stdout is ignored
fn write_info(message: &str) {
    let _ = writeln!(std::io::stdout().lock(), "{message}");
}

/// Write to stderr; failures are ignored
fn write_error(message: &str) {
    let _ = writeln!(std::io::stderr().lock(), "{message}");
}

const RULE: &str = "======================================================================";

pub fn log_server_start(config: &ServerConfig) {
    let port = config.port;
    write_info(&format!("\n{RULE}"));
    write_info("  CT Scanner AR App - Local Development Server");
    write_info(RULE);
    write_info("\n  Server running at:");
    write_info(&format!("     - http://localhost:{port}"));
    write_info(&format!("     - http://127.0.0.1:{port}"));
    write_info(&format!(
        "\n  Serving files from: {}",
        config.root.display()
    ));
    write_info("\n  For mobile testing:");
    write_info("     1. Find your local IP address:");
    write_info("        Windows: Run 'ipconfig' in Command Prompt");
    write_info("        Mac/Linux: Run 'ifconfig' or 'ip addr' in Terminal");
    write_info("     2. On your phone/tablet, navigate to:");
    write_info(&format!("        http://[YOUR_IP_ADDRESS]:{port}"));
    write_info("\n  Press Ctrl+C to stop the server");
    write_info(&format!("{RULE}\n"));
}

pub fn log_shutdown_started() {
    write_info("\n\n  Shutting down server...");
}

pub fn log_forced_shutdown() {
    write_info("  Forcing shutdown...");
}

pub fn log_server_stopped() {
    write_info("  Server stopped. Goodbye!\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
