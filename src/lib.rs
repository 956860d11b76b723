//! # fieldlog
//!
//! A structured logging facade: attach immutable key/value fields to a
//! logger, emit leveled entries, and render each entry as a text line or a
//! JSON object.
//!
//! ## Features
//!
//! - **Immutable fields**: a [`FieldSet`] is shared, never modified in place
//! - **Two formats**: byte-exact text lines and newline-delimited JSON
//! - **Independent copies**: [`Logger::copy`] keeps the configuration and
//!   output stream under a new sink handle
//! - **Thread safe**: logging takes `&self`; each entry is one write
//!
//! ```
//! use fieldlog::prelude::*;
//!
//! let buffer = MemoryBuffer::new();
//! let mut logger = Logger::with_sink(Sink::memory(&buffer));
//! logger
//!     .put_fields(fields! { "numberVal" => 1, "stringVal" => "this is a sentence" })
//!     .set_config(&ConfigOption::Formatter(OutputFormat::Json).into());
//! logger.debug("This is a test message");
//!
//! let out: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
//! assert_eq!(out["level"], "DEBUG");
//! assert_eq!(out["fields"]["numberVal"], 1);
//! ```

pub mod core;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Clock, ConfigKey, ConfigOption, FieldSet, FieldValue, FixedClock, LogEntry, LogLevel,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink, SinkId,
        SystemClock, TimestampFormat,
    };
    pub use crate::formatters::{Formatter, FormatterConfig, JsonFormatter, OutputFormat, TextFormatter};
    pub use crate::sinks::MemoryBuffer;
    pub use crate::{debug, error, fatal, fields, info, trace, warn};
}

pub use crate::core::{
    Clock, ConfigKey, ConfigOption, FieldSet, FieldValue, FixedClock, Location, LogEntry,
    LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink,
    SinkId, SystemClock, TimestampFormat,
};
pub use formatters::{Formatter, FormatterConfig, JsonFormatter, OutputFormat, TextFormatter};
pub use sinks::MemoryBuffer;
