//! Configuration schema definitions

use crate::accuracy::GpsAccuracy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl ConfigSchema {
    /// Reject values that parse but cannot drive a location subscription.
    pub fn validate(&self) -> Result<()> {
        if self.location.time_interval_ms == 0 {
            return Err(Error::invalid_config_value(
                "location.time_interval_ms",
                "must be greater than 0",
            ));
        }
        let distance = self.location.distance_interval_m;
        if !distance.is_finite() || distance < 0.0 {
            return Err(Error::invalid_config_value(
                "location.distance_interval_m",
                format!("must be a finite number >= 0, got {}", distance),
            ));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(Error::invalid_config_value(
                "export.file_prefix",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Location provider watch settings
///
/// Passed by the host application to the platform provider when it starts
/// watching. Samples are not filtered against these values here; the
/// provider applies them before a fix is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Accuracy tier requested from the provider
    #[serde(default)]
    pub accuracy: GpsAccuracy,

    /// Minimum time between fixes
    #[serde(default = "default_time_interval_ms")]
    pub time_interval_ms: u64,

    /// Minimum movement between fixes
    #[serde(default = "default_distance_interval_m")]
    pub distance_interval_m: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            accuracy: GpsAccuracy::default(),
            time_interval_ms: default_time_interval_ms(),
            distance_interval_m: default_distance_interval_m(),
        }
    }
}

fn default_time_interval_ms() -> u64 {
    1000
}

fn default_distance_interval_m() -> f64 {
    1.0
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// CSV export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Prefix of generated export file names
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_file_prefix() -> String {
    "walking_routes".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.location.accuracy, GpsAccuracy::BestForNavigation);
        assert_eq!(schema.location.time_interval_ms, 1000);
        assert_eq!(schema.logging.level, "info");
        assert_eq!(schema.export.file_prefix, "walking_routes");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [location]
            accuracy = "hundred-meters"
            "#,
        )
        .unwrap();
        assert_eq!(schema.location.accuracy, GpsAccuracy::HundredMeters);
        assert_eq!(schema.location.distance_interval_m, 1.0);
        assert!(!schema.logging.json);
    }

    #[test]
    fn test_unknown_accuracy_rejected() {
        let parsed: std::result::Result<ConfigSchema, _> = toml::from_str(
            r#"
            [location]
            accuracy = "pinpoint"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_intervals() {
        let mut schema = ConfigSchema::default();
        schema.location.time_interval_ms = 0;
        let err = schema.validate().unwrap_err();
        assert!(err.message.contains("time_interval_ms"));

        let mut schema = ConfigSchema::default();
        schema.location.distance_interval_m = -2.0;
        assert!(schema.validate().is_err());
    }
}
