//! JSON line formatter for structured log collectors

use super::FormatterConfig;
use crate::core::{LogEntry, LoggerError, Result, TimestampFormat};

/// Renders each entry as one JSON object followed by `\n`
///
/// Top-level keys are `timestamp`, `level`, `message`, `fields` (only when
/// the entry has fields) and `caller` (only when caller reporting is on and
/// the entry has a location). Keys are emitted in lexical order. Field values
/// keep their JSON type: numbers stay numbers.
///
/// A field value JSON cannot represent (NaN, infinity) fails the whole entry
/// with [`LoggerError::Encoding`]; no partial object is produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonFormatter {
    config: FormatterConfig,
}

impl JsonFormatter {
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

    pub fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert("timestamp".to_string(), self.format_timestamp(entry));
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        if !entry.fields.is_empty() {
            let mut fields = serde_json::Map::new();
            for (key, value) in entry.fields.iter() {
                let encoded = value.to_json_value().ok_or_else(|| {
                    LoggerError::encoding(key, format!("{} has no JSON representation", value))
                })?;
                fields.insert(key.to_string(), encoded);
            }
            json_obj.insert("fields".to_string(), serde_json::Value::Object(fields));
        }

        if self.config.report_caller {
            if let Some(location) = entry.location {
                json_obj.insert(
                    "caller".to_string(),
                    serde_json::Value::String(location.to_string()),
                );
            }
        }

        let mut data = serde_json::to_vec(&serde_json::Value::Object(json_obj))?;
        data.push(b'\n');
        Ok(data)
    }

    fn format_timestamp(&self, entry: &LogEntry) -> serde_json::Value {
        match self.config.timestamp_format.numeric(&entry.timestamp) {
            Some(n) => serde_json::Value::Number(n.into()),
            None => serde_json::Value::String(self.config.timestamp_format.format(&entry.timestamp)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldSet, Location, LogLevel};
    use chrono::{DateTime, TimeZone, Utc};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
    }

    #[test]
    fn test_no_fields_is_exact() {
        let entry = LogEntry::new(at(), LogLevel::Info, "hi");
        let out = JsonFormatter::new().format(&entry).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"level\":\"INFO\",\"message\":\"hi\",\"timestamp\":\"2025-01-08T10:30:45Z\"}\n"
        );
    }

    #[test]
    fn test_fields_keep_json_types() {
        let fields = FieldSet::new()
            .with("numberVal", 1)
            .with("byteVal", b'k')
            .with("stringVal", "this is a sentence")
            .with("ok", true)
            .with("ratio", 0.5);
        let entry = LogEntry::new(at(), LogLevel::Debug, "This is a test message").with_fields(fields);

        let out = JsonFormatter::new().format(&entry).unwrap();
        assert_eq!(out.last(), Some(&b'\n'));

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["level"], "DEBUG");
        assert_eq!(parsed["message"], "This is a test message");
        assert_eq!(parsed["fields"]["numberVal"], 1);
        assert_eq!(parsed["fields"]["byteVal"], 107);
        assert_eq!(parsed["fields"]["stringVal"], "this is a sentence");
        assert_eq!(parsed["fields"]["ok"], true);
        assert_eq!(parsed["fields"]["ratio"], 0.5);
        assert_eq!(parsed["fields"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_empty_fields_are_absent() {
        let entry = LogEntry::new(at(), LogLevel::Info, "no context");
        let out = JsonFormatter::new().format(&entry).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(parsed.get("fields").is_none());
        assert!(parsed.get("caller").is_none());
    }

    #[test]
    fn test_non_finite_float_is_an_encoding_error() {
        let entry = LogEntry::new(at(), LogLevel::Info, "bad")
            .with_fields(FieldSet::new().with("ok", 1).with("ratio", f64::NAN));

        let err = JsonFormatter::new().format(&entry).unwrap_err();
        assert!(matches!(err, LoggerError::Encoding { ref key, .. } if key == "ratio"));
    }

    #[test]
    fn test_numeric_timestamp() {
        let entry = LogEntry::new(at(), LogLevel::Info, "tick");
        let out = JsonFormatter::new()
            .with_timestamp_format(TimestampFormat::Unix)
            .format(&entry)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["timestamp"], 1736332245_i64);
    }

    #[test]
    fn test_caller_key() {
        let entry = LogEntry::new(at(), LogLevel::Info, "here")
            .with_location(Location::new("src/lib.rs", 12, "app"));
        let out = JsonFormatter::new().with_report_caller(true).format(&entry).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["caller"], "src/lib.rs:12");
    }

    #[test]
    fn test_message_is_escaped_not_rewritten() {
        let entry = LogEntry::new(at(), LogLevel::Info, "line one\nline \"two\"");
        let out = JsonFormatter::new().format(&entry).unwrap();

        assert_eq!(out.iter().filter(|b| **b == b'\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["message"], "line one\nline \"two\"");
    }
}
