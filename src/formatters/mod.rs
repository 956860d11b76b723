//! Output formatters for log entries
//!
//! A formatter renders one [`LogEntry`] into the exact bytes handed to the
//! sink, including the trailing newline:
//! - `Text`: a single human-readable line (default)
//! - `Json`: one JSON object per line
//!
//! The set of formatters is closed; [`Formatter`] is a plain enum and is
//! copied by value, so two loggers never share formatter state.

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::core::{LogEntry, Result, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format selector used by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `2025-01-08T10:30:45Z user=alice INFO Request processed \n`
    #[default]
    Text,

    /// Example: `{"level":"INFO","message":"Request processed","timestamp":"2025-01-08T10:30:45Z"}`
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

/// Settings shared by every formatter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Timestamp format for log entries
    pub timestamp_format: TimestampFormat,
    /// Whether to include the call site (file:line) when the entry has one
    pub report_caller: bool,
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_report_caller(mut self, report_caller: bool) -> Self {
        self.report_caller = report_caller;
        self
    }
}

/// The formatter installed on a logger
#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    Text(TextFormatter),
    Json(JsonFormatter),
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Text(TextFormatter::default())
    }
}

impl Formatter {
    /// Build the formatter for `kind` with the given settings
    pub fn new(kind: OutputFormat, config: FormatterConfig) -> Self {
        match kind {
            OutputFormat::Text => Formatter::Text(TextFormatter::with_config(config)),
            OutputFormat::Json => Formatter::Json(JsonFormatter::with_config(config)),
        }
    }

    /// Render an entry; on error nothing is produced
    pub fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        match self {
            Formatter::Text(text) => Ok(text.format(entry)),
            Formatter::Json(json) => json.format(entry),
        }
    }

    pub fn kind(&self) -> OutputFormat {
        match self {
            Formatter::Text(_) => OutputFormat::Text,
            Formatter::Json(_) => OutputFormat::Json,
        }
    }

    pub fn config(&self) -> &FormatterConfig {
        match self {
            Formatter::Text(text) => text.config(),
            Formatter::Json(json) => json.config(),
        }
    }

    /// Switch the output format, keeping the current settings
    pub fn set_kind(&mut self, kind: OutputFormat) {
        if self.kind() != kind {
            *self = Formatter::new(kind, self.config().clone());
        }
    }

    pub fn set_timestamp_format(&mut self, format: TimestampFormat) {
        let config = self.config().clone().with_timestamp_format(format);
        *self = Formatter::new(self.kind(), config);
    }

    pub fn set_report_caller(&mut self, report_caller: bool) {
        let config = self.config().clone().with_report_caller(report_caller);
        *self = Formatter::new(self.kind(), config);
    }
}

impl From<TextFormatter> for Formatter {
    fn from(formatter: TextFormatter) -> Self {
        Formatter::Text(formatter)
    }
}

impl From<JsonFormatter> for Formatter {
    fn from(formatter: JsonFormatter) -> Self {
        Formatter::Json(formatter)
    }
}
