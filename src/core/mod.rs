//! Core logger types

pub mod config;
pub mod error;
pub mod field_set;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use config::{ConfigKey, ConfigOption, LoggerConfig};
pub use error::{LoggerError, Result};
pub use field_set::{FieldSet, FieldValue};
pub use log_entry::{Location, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::{Sink, SinkId};
pub use timestamp::{Clock, FixedClock, SystemClock, TimestampFormat};
