//! Logging infrastructure for termfold.
//!
//! A process-wide logger keeping the last entries in memory and
//! optionally appending them to a file. Logging before [`init`] is a
//! no-op, so library crates may log unconditionally.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

#[derive(Debug)]
struct Logger {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
    min_level: LogLevel,
    /// None keeps the log in memory only
    file_path: Option<PathBuf>,
}

impl Logger {
    fn new(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        if let Some(path) = &file_path {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Truncate on startup
            if let Ok(mut file) = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(file, "=== termfold log start ===");
            }
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            min_level,
            file_path,
        }
    }

    fn add_entry(&mut self, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();

        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
            }
        }

        self.entries.push_back(LogEntry {
            timestamp,
            level,
            message,
        });
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

fn with_logger(f: impl FnOnce(&mut Logger)) {
    if let Some(logger) = LOGGER.get() {
        if let Ok(mut logger) = logger.lock() {
            f(&mut logger);
        }
    }
}

/// Initialize the global logger
///
/// Subsequent calls are ignored.
///
/// # Arguments
///
/// * `file_path` - Path to the log file, or None for in-memory logging only
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record
pub fn init(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, max_entries, min_level)));
}

/// Check whether [`init`] has been called.
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Set minimum log level dynamically
pub fn set_min_level(level: LogLevel) {
    with_logger(|logger| logger.min_level = level);
}

/// Log a message at `level`
pub fn log(level: LogLevel, message: impl Into<String>) {
    with_logger(|logger| logger.add_entry(level, message.into()));
}

/// Log a debug message
pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

/// Log an informational message
pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

/// Log a warning message
pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message);
}

/// Log an error message
pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

/// Get all log entries currently stored in memory
pub fn get_entries() -> Vec<LogEntry> {
    let mut entries = Vec::new();
    with_logger(|logger| entries = logger.entries.iter().cloned().collect());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("verbose".parse::<LogLevel>().is_err());
        assert!(LogLevel::Debug < LogLevel::Error);
    }

    #[test]
    fn test_local_logger_filters_and_trims() {
        let mut logger = Logger::new(None, 2, LogLevel::Info);
        logger.add_entry(LogLevel::Debug, "dropped".to_string());
        logger.add_entry(LogLevel::Info, "one".to_string());
        logger.add_entry(LogLevel::Warn, "two".to_string());
        logger.add_entry(LogLevel::Error, "three".to_string());

        let messages: Vec<_> = logger.entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_local_logger_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("termfold.log");

        let mut logger = Logger::new(Some(path.clone()), 10, LogLevel::Debug);
        logger.add_entry(LogLevel::Warn, "handle drag clamped".to_string());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("=== termfold log start ==="));
        assert!(content.contains("WARN: handle drag clamped"));
    }

    #[test]
    fn test_global_logger_records() {
        init(None, 100, LogLevel::Debug);
        info("global entry");
        assert!(is_initialized());
        assert!(get_entries().iter().any(|e| e.message == "global entry"));
    }
}
