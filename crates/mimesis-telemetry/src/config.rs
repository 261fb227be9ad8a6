//! Telemetry configuration.

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "MIMESIS_LOG_LEVEL";

/// Environment variable selecting the log format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "MIMESIS_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON output.
    #[default]
    Json,
    /// Human-readable pretty output (development).
    Pretty,
}

impl LogFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Log level filter (default: "info").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl TelemetryConfig {
    /// Create a new telemetry config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `MIMESIS_LOG_LEVEL` and `MIMESIS_LOG_FORMAT`.
    ///
    /// Unset variables keep their defaults; an unrecognized format is ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).as_deref().and_then(LogFormat::parse) {
            config.log_format = format;
        }
        config
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_config_builder() {
        let config = TelemetryConfig::new()
            .with_log_level("debug")
            .with_log_format(LogFormat::Pretty);

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(LOG_LEVEL_ENV, "mimesis=trace"), (LOG_FORMAT_ENV, "PRETTY")]);
        let config = TelemetryConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.log_level, "mimesis=trace");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_lookup_ignores_bad_format() {
        let config = TelemetryConfig::from_lookup(|k| {
            (k == LOG_FORMAT_ENV).then(|| "xml".to_string())
        });
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
    }
}
