/// Logger configuration, derived from command-line flags
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that is displayed
    pub min_level: LogLevel,
    /// Tags with debug output enabled (`--debug-<tag>`)
    pub debug_tags: HashSet<String>,
    /// Tags with verbose output enabled (`--verbose-<tag>`)
    pub verbose_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Build the logger configuration from process arguments
pub fn init_from_args(args: &[String]) {
    set_logger_config(parse_args(args));
}

fn parse_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if arg == "--quiet" {
            config.min_level = LogLevel::Error;
        } else if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if let Some(tag) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(tag.to_lowercase());
            if config.min_level < LogLevel::Debug {
                config.min_level = LogLevel::Debug;
            }
        } else if let Some(tag) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(tag.to_lowercase());
            config.debug_tags.insert(tag.to_lowercase());
            config.min_level = LogLevel::Verbose;
        } else if let Some(level) = arg.strip_prefix("--log-level=") {
            if let Some(level) = LogLevel::parse(level) {
                config.min_level = level;
            }
        }
    }

    config
}

pub(super) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains(&tag.to_debug_key())
}

pub(super) fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_debug_flag_enables_tag() {
        let config = parse_args(&args(&["matchday", "--debug-cache"]));
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Cache));
        assert!(!is_debug_enabled_for_tag(&config, &LogTag::Api));
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_quiet_lowers_threshold() {
        let config = parse_args(&args(&["matchday", "--quiet"]));
        assert_eq!(config.min_level, LogLevel::Error);
    }
}
