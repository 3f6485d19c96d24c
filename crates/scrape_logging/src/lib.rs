#![deny(missing_docs)]
//! Shared logging utilities for the catalog scraper workspace.
//!
//! This crate provides the `scrape_*` logging macros used across the codebase,
//! the run-log initializer used by the binary and a minimal test initializer.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Where the run log goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTargets {
    /// Append-style run log. `None` disables the file logger.
    pub log_file: Option<PathBuf>,
    /// Level written to the run log.
    pub file_level: LevelFilter,
    /// Level mirrored to stderr. `LevelFilter::Off` disables the terminal logger.
    pub terminal_level: LevelFilter,
}

impl Default for LogTargets {
    fn default() -> Self {
        Self {
            log_file: None,
            file_level: LevelFilter::Info,
            terminal_level: LevelFilter::Warn,
        }
    }
}

/// Installs the global logger for a scraper run.
///
/// The file logger appends to `targets.log_file` so successive runs share one
/// log. The terminal logger writes to stderr, keeping stdout free for the
/// exported document. If the log file cannot be opened a warning is printed
/// and the run continues with the terminal logger only.
pub fn initialize(targets: &LogTargets) {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if targets.terminal_level != LevelFilter::Off {
        loggers.push(TermLogger::new(
            targets.terminal_level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    if let Some(path) = targets.log_file.as_deref() {
        match open_log_file(path) {
            Ok(file) => loggers.push(WriteLogger::new(targets.file_level, config, file)),
            Err(err) => {
                eprintln!("Warning: Could not open log file at {:?}: {}", path, err);
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
}

/// Opens (creating if needed) the run log in append mode.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
