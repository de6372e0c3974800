//! Console formatting: colored tag/level columns, timestamps and line wrapping
//!
//! Every level goes to stderr. Stdout carries command output only.

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{self, stderr, ErrorKind, Write};

const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 140;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let result = write_record(&mut stderr().lock(), tag, level, message);

    if let Err(e) = result {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}

/// Write one record, wrapped and aligned under its prefix
fn write_record<W: Write>(out: &mut W, tag: LogTag, level: LogLevel, message: &str) -> io::Result<()> {
    let time = Local::now().format("%H:%M:%S").to_string();

    let prefix_width = time.len() + 1 + TAG_WIDTH + 3 + LEVEL_WIDTH + 3;
    let base_line = format!(
        "{} [{}] [{}] ",
        time.dimmed(),
        format_tag(&tag),
        format_level(level)
    );

    let available = MAX_LINE_LENGTH.saturating_sub(prefix_width).max(40);
    let chunks = wrap_text(message, available);

    writeln!(out, "{}{}", base_line, chunks[0])?;
    for chunk in &chunks[1..] {
        writeln!(out, "{}{}", " ".repeat(prefix_width), chunk)?;
    }
    out.flush()
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::Cache => label.bright_magenta().bold(),
        LogTag::Api => label.bright_cyan().bold(),
        LogTag::Aggregator => label.bright_green().bold(),
        LogTag::Logos => label.bright_blue().bold(),
        LogTag::Config => label.bright_yellow().bold(),
        LogTag::System => label.bright_white().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug => label.bright_black(),
        LogLevel::Verbose => label.dimmed(),
    }
}

/// Wrap text at word boundaries, respecting existing newlines
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();

            if word_len > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_width) {
                    result.push(chunk.iter().collect());
                }
            } else if current.is_empty() {
                current = word.to_string();
            } else if current_len + word_len + 1 <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_splits_on_words() {
        let lines = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_record_is_prefixed_and_wrapped() {
        let mut out = Vec::new();
        let message = format!("Phase 1: {}", "word ".repeat(40));
        write_record(&mut out, LogTag::Aggregator, LogLevel::Info, &message).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines[0].contains("AGGREGATE"));
        assert!(lines[0].contains("Phase 1:"));
        assert!(lines[1].starts_with(' '));
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
