//! Human-readable single line formatter

use super::FormatterConfig;
use crate::core::{LogEntry, TimestampFormat};
use std::borrow::Cow;

/// Renders `<timestamp> [<k>=<v> ...] <LEVEL> [<message> ]\n`
///
/// The field block and its trailing space appear only when the entry has
/// fields; the message and its trailing space only when the message is not
/// empty. Fields are written in key order. Backslashes and line breaks in
/// keys, values and the message are escaped.
///
/// # Example
///
/// ```
/// use fieldlog::formatters::TextFormatter;
/// use fieldlog::{FieldSet, LogEntry, LogLevel};
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// let entry = LogEntry::new(at, LogLevel::Info, "hi")
///     .with_fields(FieldSet::new().with("user", "alice"));
///
/// let line = TextFormatter::new().format(&entry);
/// assert_eq!(line, b"2025-01-08T10:30:45Z user=alice INFO hi \n");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormatter {
    config: FormatterConfig,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_report_caller(mut self, report_caller: bool) -> Self {
        self.config.report_caller = report_caller;
        self
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn format(&self, entry: &LogEntry) -> Vec<u8> {
        let mut line = String::with_capacity(64 + entry.message.len());

        line.push_str(&self.config.timestamp_format.format(&entry.timestamp));
        line.push(' ');

        if !entry.fields.is_empty() {
            for (idx, (key, value)) in entry.fields.iter().enumerate() {
                if idx > 0 {
                    line.push(' ');
                }
                line.push_str(&escape_line_breaks(key));
                line.push('=');
                line.push_str(&escape_line_breaks(&value.to_string()));
            }
            line.push(' ');
        }

        line.push_str(entry.level.to_str());
        line.push(' ');

        if !entry.message.is_empty() {
            line.push_str(&escape_line_breaks(&entry.message));
            line.push(' ');
        }

        if self.config.report_caller {
            if let Some(location) = entry.location {
                line.push_str(&location.to_string());
                line.push(' ');
            }
        }

        line.push('\n');
        line.into_bytes()
    }
}

/// Keep one entry on one line and reversible: backslash, CR and LF become
/// `\\`, `\r` and `\n`
fn escape_line_breaks(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| matches!(c, '\\' | '\n' | '\r')) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
