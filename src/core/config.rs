//! Logger configuration options
//!
//! Every option a logger understands is a [`ConfigOption`] variant, keyed by
//! a [`ConfigKey`]. Typed options cannot name an unknown setting; string
//! settings coming from code go through `Logger::apply_settings`, which
//! treats an unknown key as a bug and panics, while settings coming from data
//! go through [`ConfigOption::parse`] or [`LoggerConfig::from_json`] and get a
//! [`LoggerError::InvalidConfiguration`] instead.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use crate::formatters::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Name of a configurable logger setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    Formatter,
    MinLevel,
    TimestampFormat,
    ReportCaller,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Formatter => "formatter",
            ConfigKey::MinLevel => "min_level",
            ConfigKey::TimestampFormat => "timestamp_format",
            ConfigKey::ReportCaller => "report_caller",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "formatter" => Ok(ConfigKey::Formatter),
            "min_level" => Ok(ConfigKey::MinLevel),
            "timestamp_format" => Ok(ConfigKey::TimestampFormat),
            "report_caller" => Ok(ConfigKey::ReportCaller),
            _ => Err(LoggerError::config(s, "unknown configuration key")),
        }
    }
}

/// A setting paired with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
    /// Which formatter renders entries
    Formatter(OutputFormat),
    /// Entries below this level are skipped
    MinLevel(LogLevel),
    TimestampFormat(TimestampFormat),
    /// Include the call site in output when the entry carries one
    ReportCaller(bool),
}

impl ConfigOption {
    pub fn key(&self) -> ConfigKey {
        match self {
            ConfigOption::Formatter(_) => ConfigKey::Formatter,
            ConfigOption::MinLevel(_) => ConfigKey::MinLevel,
            ConfigOption::TimestampFormat(_) => ConfigKey::TimestampFormat,
            ConfigOption::ReportCaller(_) => ConfigKey::ReportCaller,
        }
    }

    /// Parse a textual `key = value` setting
    ///
    /// ```
    /// use fieldlog::{ConfigOption, OutputFormat};
    ///
    /// let option = ConfigOption::parse("formatter", "json").unwrap();
    /// assert_eq!(option, ConfigOption::Formatter(OutputFormat::Json));
    /// assert!(ConfigOption::parse("colour", "red").is_err());
    /// ```
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let key: ConfigKey = key.parse()?;
        let invalid = |message: String| LoggerError::config(key.as_str(), message);

        let option = match key {
            ConfigKey::Formatter => ConfigOption::Formatter(value.parse().map_err(invalid)?),
            ConfigKey::MinLevel => ConfigOption::MinLevel(value.parse().map_err(invalid)?),
            ConfigKey::TimestampFormat => {
                ConfigOption::TimestampFormat(value.parse().map_err(invalid)?)
            }
            ConfigKey::ReportCaller => ConfigOption::ReportCaller(
                value
                    .parse()
                    .map_err(|_| invalid(format!("expected true or false, got '{}'", value)))?,
            ),
        };
        Ok(option)
    }
}

/// A set of options, at most one per key
///
/// Options are independent of each other, so the order they are applied in
/// does not matter; setting a key twice keeps the last value.
///
/// # Example
///
/// ```
/// use fieldlog::{ConfigOption, LogLevel, LoggerConfig, OutputFormat};
///
/// let config = LoggerConfig::new()
///     .with(ConfigOption::Formatter(OutputFormat::Json))
///     .with(ConfigOption::MinLevel(LogLevel::Info));
/// assert_eq!(config.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    options: BTreeMap<ConfigKey, ConfigOption>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, option: ConfigOption) -> Self {
        self.set(option);
        self
    }

    pub fn set(&mut self, option: ConfigOption) {
        self.options.insert(option.key(), option);
    }

    pub fn get(&self, key: ConfigKey) -> Option<&ConfigOption> {
        self.options.get(&key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigOption> + '_ {
        self.options.values()
    }

    /// Parse textual settings, failing on the first bad key or value
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = LoggerConfig::new();
        for (key, value) in pairs {
            config.set(ConfigOption::parse(key.as_ref(), value.as_ref())?);
        }
        Ok(config)
    }

    /// Parse a flat JSON object of settings
    ///
    /// Booleans may be given as JSON booleans or strings.
    ///
    /// ```
    /// use fieldlog::{ConfigKey, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_json(
    ///     r#"{"formatter": "json", "min_level": "debug", "report_caller": true}"#,
    /// ).unwrap();
    /// assert_eq!(config.len(), 3);
    /// assert!(config.get(ConfigKey::TimestampFormat).is_none());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let pairs = raw.into_iter().map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        });
        Self::from_pairs(pairs)
    }
}

impl FromIterator<ConfigOption> for LoggerConfig {
    fn from_iter<I: IntoIterator<Item = ConfigOption>>(iter: I) -> Self {
        let mut config = LoggerConfig::new();
        for option in iter {
            config.set(option);
        }
        config
    }
}

impl From<ConfigOption> for LoggerConfig {
    fn from(option: ConfigOption) -> Self {
        LoggerConfig::new().with(option)
    }
}
