/// Filtering rules applied before a message is formatted
///
/// 1. Errors are always shown
/// 2. Anything above the minimum level threshold is dropped
/// 3. Debug requires --debug-<module> for the tag
/// 4. Verbose requires --verbose or --verbose-<module>
use super::config::{
    get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag, LoggerConfig,
};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    match level {
        LogLevel::Debug => is_debug_enabled_for_tag(config, tag),
        LogLevel::Verbose => {
            config.verbose_tags.is_empty() || is_verbose_enabled_for_tag(config, tag)
        }
        _ => true,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
