//! Timestamp formatting and the wall-clock source
//!
//! Entries capture their timestamp from a [`Clock`] so tests can pin time
//! with [`FixedClock`] and compare output byte for byte.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use fieldlog::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339Nanos.format(&at), "2025-01-08T10:30:45Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 in UTC with up to nine fractional digits, trailing zeros
    /// trimmed: `2025-01-08T10:30:45.1234567Z`
    ///
    /// This is the default format.
    #[default]
    Rfc3339Nanos,

    /// RFC 3339 with whole seconds: `2025-01-08T10:30:45Z`
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339Nanos => format_rfc3339_nanos(datetime),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // An unusable pattern falls back to the default format
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => format_rfc3339_nanos(datetime),
                }
            }
        }
    }

    /// Numeric value for Unix-based formats, `None` for string formats
    #[must_use]
    pub fn numeric(&self, datetime: &DateTime<Utc>) -> Option<i64> {
        match self {
            TimestampFormat::Unix => Some(datetime.timestamp()),
            TimestampFormat::UnixMillis => Some(datetime.timestamp_millis()),
            TimestampFormat::UnixMicros => Some(datetime.timestamp_micros()),
            _ => None,
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

fn format_rfc3339_nanos(datetime: &DateTime<Utc>) -> String {
    let full = datetime.to_rfc3339_opts(SecondsFormat::Nanos, true);
    // "....:SS.fffffffffZ" -> drop trailing zero digits, and the dot if nothing is left
    let body = &full[..full.len() - 1];
    let trimmed = match body.rfind('.') {
        Some(dot) => {
            let fraction = body[dot + 1..].trim_end_matches('0');
            if fraction.is_empty() {
                &body[..dot]
            } else {
                &body[..dot + 1 + fraction.len()]
            }
        }
        None => body,
    };
    format!("{}Z", trimmed)
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::Rfc3339Nanos => f.write_str("rfc3339nano"),
            TimestampFormat::Rfc3339 => f.write_str("rfc3339"),
            TimestampFormat::Iso8601 => f.write_str("iso8601"),
            TimestampFormat::Iso8601Micros => f.write_str("iso8601micros"),
            TimestampFormat::Unix => f.write_str("unix"),
            TimestampFormat::UnixMillis => f.write_str("unix_millis"),
            TimestampFormat::UnixMicros => f.write_str("unix_micros"),
            TimestampFormat::Custom(format_str) => f.write_str(format_str),
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = String;

    /// Strings beginning with `%` are taken as strftime patterns
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('%') {
            if StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
                return Err(format!("Invalid strftime pattern: '{}'", s));
            }
            return Ok(TimestampFormat::Custom(s.to_string()));
        }
        match s.to_lowercase().as_str() {
            "rfc3339nano" | "rfc3339nanos" => Ok(TimestampFormat::Rfc3339Nanos),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601micros" => Ok(TimestampFormat::Iso8601Micros),
            "unix" => Ok(TimestampFormat::Unix),
            "unix_millis" => Ok(TimestampFormat::UnixMillis),
            "unix_micros" => Ok(TimestampFormat::UnixMicros),
            _ => Err(format!("Invalid timestamp format: '{}'", s)),
        }
    }
}

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_nanos_trims_trailing_zeros() {
        let format = TimestampFormat::Rfc3339Nanos;
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08T10:30:45.123456Z");

        let whole = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        assert_eq!(format.format(&whole), "2025-01-08T10:30:45Z");

        let nanos = whole + chrono::Duration::nanoseconds(120_000_007);
        assert_eq!(format.format(&nanos), "2025-01-08T10:30:45.120000007Z");

        let tenth = whole + chrono::Duration::milliseconds(100);
        assert_eq!(format.format(&tenth), "2025-01-08T10:30:45.1Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45Z");
    }

    #[test]
    fn test_iso8601_format() {
        assert_eq!(
            TimestampFormat::Iso8601.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123Z"
        );
        assert_eq!(
            TimestampFormat::Iso8601Micros.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123456Z"
        );
    }

    #[test]
    fn test_unix_formats() {
        let at = fixed_datetime();
        assert_eq!(TimestampFormat::Unix.numeric(&at), Some(1736332245));
        assert_eq!(TimestampFormat::UnixMillis.numeric(&at), Some(1736332245123));
        assert_eq!(TimestampFormat::UnixMicros.numeric(&at), Some(1736332245123456));
        assert_eq!(TimestampFormat::UnixMillis.format(&at), "1736332245123");
        assert_eq!(TimestampFormat::Iso8601.numeric(&at), None);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08");

        let broken = TimestampFormat::Custom("%Q".to_string());
        assert_eq!(broken.format(&fixed_datetime()), "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_is_numeric() {
        assert!(TimestampFormat::Unix.is_numeric());
        assert!(TimestampFormat::UnixMicros.is_numeric());
        assert!(!TimestampFormat::Rfc3339Nanos.is_numeric());
        assert!(!TimestampFormat::Custom("%s".to_string()).is_numeric());
    }

    #[test]
    fn test_parse() {
        assert_eq!("rfc3339nano".parse::<TimestampFormat>(), Ok(TimestampFormat::Rfc3339Nanos));
        assert_eq!("UNIX_MILLIS".parse::<TimestampFormat>(), Ok(TimestampFormat::UnixMillis));
        assert_eq!(
            "%H:%M".parse::<TimestampFormat>(),
            Ok(TimestampFormat::Custom("%H:%M".to_string()))
        );
        assert!("epoch".parse::<TimestampFormat>().is_err());
        assert!("%Q".parse::<TimestampFormat>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for format in [
            TimestampFormat::Rfc3339Nanos,
            TimestampFormat::Iso8601Micros,
            TimestampFormat::UnixMicros,
        ] {
            assert_eq!(format.to_string().parse::<TimestampFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(fixed_datetime());
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), fixed_datetime());
    }
}
