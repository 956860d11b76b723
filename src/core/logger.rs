//! Main logger implementation

use super::{
    config::{ConfigOption, LoggerConfig},
    error::Result,
    field_set::FieldSet,
    log_entry::{Location, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::{Sink, SinkId},
    timestamp::{Clock, SystemClock, TimestampFormat},
};
use crate::formatters::{Formatter, FormatterConfig, OutputFormat};
use std::fmt;
use std::sync::Arc;

/// A structured logger
///
/// Every call captures the time, packages the message with the logger's
/// current [`FieldSet`] into a [`LogEntry`], renders it with the installed
/// [`Formatter`] and hands the bytes to the sink in one write.
///
/// Logging takes `&self` and is safe from many threads. Changing fields or
/// configuration takes `&mut self`; to scope fields per task, [`copy`] the
/// logger instead of sharing a mutable one.
///
/// [`copy`]: Logger::copy
///
/// # Example
///
/// ```
/// use fieldlog::{FieldSet, Logger, MemoryBuffer, Sink};
///
/// let buffer = MemoryBuffer::new();
/// let mut logger = Logger::with_sink(Sink::memory(&buffer));
/// logger.put_fields(FieldSet::new().with("service", "billing"));
/// logger.info("started");
///
/// assert!(buffer.contents().contains(" service=billing INFO started \n"));
/// ```
pub struct Logger {
    formatter: Formatter,
    fields: FieldSet,
    sink: Sink,
    min_level: LogLevel,
    clock: Arc<dyn Clock>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// A text logger writing every level to stderr
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Sink::stderr())
    }

    #[must_use]
    pub fn with_sink(sink: Sink) -> Self {
        Self {
            formatter: Formatter::default(),
            fields: FieldSet::new(),
            sink,
            min_level: LogLevel::Trace,
            clock: Arc::new(SystemClock),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use fieldlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .formatter(OutputFormat::Json)
    ///     .build();
    /// assert_eq!(logger.formatter().kind(), OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Replace the attached fields wholesale
    ///
    /// The previous set is not modified; anyone holding it keeps seeing the
    /// old values.
    pub fn put_fields(&mut self, fields: FieldSet) -> &mut Self {
        self.fields = fields;
        self
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn set_formatter(&mut self, formatter: impl Into<Formatter>) -> &mut Self {
        self.formatter = formatter.into();
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) -> &mut Self {
        self.min_level = level;
        self
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn sink_id(&self) -> SinkId {
        self.sink.id()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Apply every option in `config`
    pub fn set_config(&mut self, config: &LoggerConfig) -> &mut Self {
        for option in config.iter() {
            self.apply_option(option);
        }
        self
    }

    pub fn apply_option(&mut self, option: &ConfigOption) -> &mut Self {
        match option {
            ConfigOption::Formatter(kind) => self.formatter.set_kind(*kind),
            ConfigOption::MinLevel(level) => self.min_level = *level,
            ConfigOption::TimestampFormat(format) => {
                self.formatter.set_timestamp_format(format.clone())
            }
            ConfigOption::ReportCaller(report) => self.formatter.set_report_caller(*report),
        }
        self
    }

    /// Apply textual settings written into the program
    ///
    /// # Panics
    ///
    /// Panics with `unknown configuration` when a key is not recognized or
    /// its value does not parse. Such a setting is a mismatch between the
    /// caller and this library, not bad runtime input; use
    /// [`LoggerConfig::from_pairs`] for settings read from data.
    ///
    /// ```
    /// use fieldlog::{Logger, OutputFormat};
    ///
    /// let mut logger = Logger::new();
    /// logger.apply_settings([("formatter", "json")]);
    /// assert_eq!(logger.formatter().kind(), OutputFormat::Json);
    /// ```
    pub fn apply_settings<I, K, V>(&mut self, settings: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in settings {
            match ConfigOption::parse(key.as_ref(), value.as_ref()) {
                Ok(option) => {
                    self.apply_option(&option);
                }
                Err(e) => panic!("unknown configuration: {}", e),
            }
        }
        self
    }

    /// A new logger with the same formatter, level, clock and fields
    ///
    /// The copy gets its own sink handle (a different [`SinkId`]) over the
    /// same output stream, and its own metrics. Reconfiguring either logger
    /// afterwards does not affect the other.
    #[must_use]
    pub fn copy(&self) -> Logger {
        Logger {
            formatter: self.formatter.clone(),
            fields: self.fields.clone(),
            sink: self.sink.reopen(),
            min_level: self.min_level,
            clock: Arc::clone(&self.clock),
            metrics: LoggerMetrics::new(),
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Log a message; failures are reported on stderr and counted as dropped
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(level, || message.into(), None);
    }

    /// Log pre-formatted arguments, usually from `format_args!`
    ///
    /// The arguments are only rendered when `level` is enabled.
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.emit(level, || args_to_string(args), None);
    }

    /// Log a message and return any encoding or write failure to the caller
    ///
    /// ```
    /// use fieldlog::{FieldSet, LogLevel, Logger, LoggerError, MemoryBuffer, OutputFormat, Sink};
    ///
    /// let buffer = MemoryBuffer::new();
    /// let mut logger = Logger::builder()
    ///     .sink(Sink::memory(&buffer))
    ///     .formatter(OutputFormat::Json)
    ///     .build();
    /// logger.put_fields(FieldSet::new().with("ratio", f64::NAN));
    ///
    /// let err = logger.try_log(LogLevel::Info, "unencodable").unwrap_err();
    /// assert!(matches!(err, LoggerError::Encoding { .. }));
    /// assert!(buffer.is_empty());
    /// ```
    pub fn try_log(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.dispatch(level, || message.into(), None)
    }

    /// Entry point for the logging macros, which supply the call site
    #[doc(hidden)]
    pub fn log_at(&self, level: LogLevel, args: fmt::Arguments<'_>, location: Location) {
        self.emit(level, || args_to_string(args), Some(location));
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    #[inline]
    pub fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Trace, args);
    }

    #[inline]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    #[inline]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[inline]
    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warn, args);
    }

    #[inline]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    #[inline]
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Fatal, args);
    }

    fn emit(&self, level: LogLevel, message: impl FnOnce() -> String, location: Option<Location>) {
        match self.dispatch(level, message, location) {
            Ok(()) => {}
            Err(e) if e.is_encoding() => {
                eprintln!("[LOGGER ERROR] Dropped unencodable {} entry: {}", level, e);
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to write {} entry to {}: {}", level, self.sink.name(), e);
            }
        }
    }

    /// Build, render and write one entry
    fn dispatch(
        &self,
        level: LogLevel,
        message: impl FnOnce() -> String,
        location: Option<Location>,
    ) -> Result<()> {
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let mut entry =
            LogEntry::new(self.clock.now(), level, message()).with_fields(self.fields.clone());
        entry.location = location;

        let written = self
            .formatter
            .format(&entry)
            .and_then(|record| self.sink.write_record(&record));

        match written {
            Ok(()) => {
                self.metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_dropped();
                Err(e)
            }
        }
    }
}

fn args_to_string(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(literal) => literal.to_string(),
        None => args.to_string(),
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Logger {
    /// Same as [`Logger::copy`]
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("formatter", &self.formatter)
            .field("fields", &self.fields)
            .field("sink", &self.sink)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush {} during shutdown: {}", self.sink.name(), e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use fieldlog::prelude::*;
///
/// let buffer = MemoryBuffer::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .formatter(OutputFormat::Text)
///     .timestamp_format(TimestampFormat::Iso8601)
///     .fields(fields! { "service" => "api-gateway" })
///     .sink(Sink::memory(&buffer))
///     .build();
///
/// logger.debug("hidden");
/// logger.info("visible");
/// assert_eq!(buffer.lines().len(), 1);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    output_format: OutputFormat,
    formatter_config: FormatterConfig,
    fields: FieldSet,
    sink: Option<Sink>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Trace,
            output_format: OutputFormat::default(),
            formatter_config: FormatterConfig::default(),
            fields: FieldSet::new(),
            sink: None,
            clock: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter_config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_caller(mut self, report_caller: bool) -> Self {
        self.formatter_config.report_caller = report_caller;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Set the output destination; stderr when not called
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the time source; the system clock when not called
    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut logger = Logger::with_sink(self.sink.unwrap_or_default());
        logger.formatter = Formatter::new(self.output_format, self.formatter_config);
        logger.fields = self.fields;
        logger.min_level = self.min_level;
        if let Some(clock) = self.clock {
            logger.clock = clock;
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
