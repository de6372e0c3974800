//! Structured logging for matchday
//!
//! Provides a small leveled logging API:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Colored console output with aligned tag and level columns
//!
//! ## Usage
//!
//! ```rust
//! use matchday::logger::{self, LogTag};
//!
//! logger::info(LogTag::Api, "Fetched live scores");
//! logger::debug(LogTag::Cache, "Cache hit: live:scores/live?competition_id=152"); // Only if --debug-cache
//! ```
//!
//! ## Initialization
//!
//! Call once at startup with the process arguments:
//! ```rust
//! matchday::logger::init(&std::env::args().collect::<Vec<_>>());
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from command-line arguments
///
/// Scans for `--debug-<module>`, `--verbose`, `--verbose-<module>` and `--quiet`.
pub fn init(args: &[String]) {
    config::init_from_args(args);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the `--debug-<module>` flag for the tag is present.
///
/// # Example
/// ```rust
/// use matchday::logger::{self, LogTag};
///
/// // Only shown with --debug-api
/// logger::debug(LogTag::Api, "GET scores/live.json");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose or --verbose-<module>)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
