//! Configuration management for Gridsense
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files.

use crate::error::{GridsenseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pricing API configuration
    pub griddy: GriddyConfig,

    /// Price thresholds for the high/low signals
    pub thresholds: ThresholdsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Pricing API parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GriddyConfig {
    /// Settlement point (load zone) to query, e.g. "LZ_HOUSTON"
    pub settlement_point: String,

    /// Insights endpoint URL
    pub api_url: String,
}

/// Price thresholds supplied by the hosting integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// Price at or below which the reading always counts as low (cents/kWh)
    pub low_price_cents: f64,

    /// Intensity at or below which the reading counts as low (0-100)
    pub low_price_percentage: f64,

    /// Price above which the reading may count as high (cents/kWh)
    pub high_price_cents: f64,

    /// Intensity above which the reading may count as high (0-100)
    pub high_price_percentage: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-specific level override
    #[serde(default)]
    pub console_level: Option<String>,

    /// Optional file-specific level override
    #[serde(default)]
    pub file_level: Option<String>,

    /// Path to log file (or directory for rotated files)
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Default for GriddyConfig {
    fn default() -> Self {
        Self {
            settlement_point: "LZ_HOUSTON".to_string(),
            api_url: crate::griddy::DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            low_price_cents: 1.0,
            low_price_percentage: 20.0,
            high_price_cents: 2.0,
            high_price_percentage: 60.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: "/tmp/gridsense.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            griddy: GriddyConfig::default(),
            thresholds: ThresholdsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default locations, falling back to defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            "gridsense_config.yaml",
            "/data/gridsense_config.yaml",
            "/etc/gridsense/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.griddy.settlement_point.trim().is_empty() {
            return Err(GridsenseError::validation(
                "griddy.settlement_point",
                "Settlement point cannot be empty",
            ));
        }

        if self.griddy.api_url.is_empty() {
            return Err(GridsenseError::validation(
                "griddy.api_url",
                "API URL cannot be empty",
            ));
        }

        // Percentage thresholds live on the published 0-100 intensity scale.
        for (field, value) in [
            (
                "thresholds.low_price_percentage",
                self.thresholds.low_price_percentage,
            ),
            (
                "thresholds.high_price_percentage",
                self.thresholds.high_price_percentage,
            ),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(GridsenseError::validation(
                    field,
                    "Must be between 0 and 100",
                ));
            }
        }

        // Overlapping bands would let a reading classify as high and low at once.
        if self.thresholds.high_price_cents < self.thresholds.low_price_cents {
            return Err(GridsenseError::validation(
                "thresholds.high_price_cents",
                "Must be greater than or equal to low_price_cents",
            ));
        }

        if self.thresholds.high_price_percentage < self.thresholds.low_price_percentage {
            return Err(GridsenseError::validation(
                "thresholds.high_price_percentage",
                "Must be greater than or equal to low_price_percentage",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.griddy.settlement_point, "LZ_HOUSTON");
        assert_eq!(config.thresholds.high_price_cents, 2.0);
        assert_eq!(config.thresholds.high_price_percentage, 60.0);
        assert!(config.logging.console_output);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        // Empty settlement point
        config.griddy.settlement_point = "  ".to_string();
        assert!(config.validate().is_err());

        // Reset and test out-of-range percentage
        config = Config::default();
        config.thresholds.high_price_percentage = 140.0;
        assert!(config.validate().is_err());

        // Reset and test inverted bands
        config = Config::default();
        config.thresholds.low_price_cents = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            config.griddy.settlement_point,
            deserialized.griddy.settlement_point
        );
        assert_eq!(
            config.thresholds.low_price_cents,
            deserialized.thresholds.low_price_cents
        );
    }
}
