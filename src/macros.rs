//! Logging macros for ergonomic log message formatting.
//!
//! The leveled macros accept `format!`-style arguments and record the call
//! site, which formatters print when caller reporting is enabled.
//!
//! # Examples
//!
//! ```
//! use fieldlog::prelude::*;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at the given level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// use fieldlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            ::std::format_args!($($arg)+),
            $crate::Location::new(::std::file!(), ::std::line!(), ::std::module_path!()),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. This does not terminate the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Build a [`FieldSet`](crate::FieldSet) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use fieldlog::fields;
///
/// let set = fields! {
///     "user_id" => 42,
///     "action" => "login",
/// };
/// assert_eq!(set.len(), 2);
/// assert!(fields! {}.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::FieldSet::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::FieldSet::new()$(.with($key, $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldValue, LogLevel, Logger, Sink};
    use crate::sinks::MemoryBuffer;

    #[test]
    fn test_leveled_macros() {
        let buffer = MemoryBuffer::new();
        let logger = Logger::with_sink(Sink::memory(&buffer));

        trace!(logger, "t {}", 1);
        debug!(logger, "d {}", 2);
        info!(logger, "i {}", 3);
        warn!(logger, "w {}", 4);
        error!(logger, "e {}", 5);
        fatal!(logger, "f {}", 6);
        log!(logger, LogLevel::Info, "plain");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].ends_with("TRACE t 1 "));
        assert!(lines[3].ends_with("WARN w 4 "));
        assert!(lines[5].ends_with("FATAL f 6 "));
        assert!(lines[6].ends_with("INFO plain "));
    }

    #[test]
    fn test_fields_macro() {
        let set = fields! { "numberVal" => 1, "stringVal" => "s", "flag" => true };
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("flag"), Some(&FieldValue::Bool(true)));
    }
}
