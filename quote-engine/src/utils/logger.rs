//! Logging Infrastructure
//!
//! Structured logging to stderr (stdout carries command output), or to a daily
//! rolling file when a log directory is configured.

use std::path::Path;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON lines and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Only an existing directory gets a file appender
    let file_appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            Some(tracing_appender::rolling::daily(log_path, "quote-engine"))
        } else {
            None
        }
    });

    match (json.unwrap_or(false), file_appender) {
        (true, Some(appender)) => subscriber.json().with_writer(appender).init(),
        (true, None) => subscriber.json().with_writer(std::io::stderr).init(),
        (false, Some(appender)) => subscriber.with_ansi(false).with_writer(appender).init(),
        (false, None) => subscriber.with_writer(std::io::stderr).init(),
    }
}
