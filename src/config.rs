//! Configuration for mousewatch.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the sensor.
///
/// All detection thresholds are fixed at construction; the running session
/// never re-reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target period for periodic-movement detection, in seconds
    pub periodic_threshold_secs: f64,

    /// Tolerance around the target period, in seconds
    pub periodic_tolerance_secs: f64,

    /// Minimum elapsed time over the recent window to count as continuous
    /// movement, in seconds
    pub continuous_movement_threshold_secs: f64,

    /// Minimum displacement for a sample to be admitted as movement
    pub min_movement_distance: f64,

    /// Capacity of the bounded movement history
    pub history_capacity: usize,

    /// Mean-squared-error ceiling for the linear-trajectory detector
    pub linearity_threshold: f64,

    /// Path-length / net-displacement ratio for the jitter detector
    pub jitter_ratio_threshold: f64,

    /// Net displacement below which a window counts as "in place"
    pub jitter_displacement_threshold: f64,

    /// Path length that flags an in-place window as jitter
    pub jitter_path_length_threshold: f64,

    /// Cursor polling interval, in milliseconds
    pub poll_interval_ms: u64,

    /// Path the suspicious-pattern report is written to at shutdown
    pub report_path: PathBuf,

    /// Path for storing state and session statistics
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mousewatch");

        Self {
            periodic_threshold_secs: 30.0,
            periodic_tolerance_secs: 0.5,
            continuous_movement_threshold_secs: 300.0,
            min_movement_distance: 5.0,
            history_capacity: 1000,
            linearity_threshold: 0.5,
            jitter_ratio_threshold: 5.0,
            jitter_displacement_threshold: 5.0,
            jitter_path_length_threshold: 20.0,
            poll_interval_ms: 100,
            report_path: data_dir.join("suspicious_patterns.json"),
            data_path: data_dir,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mousewatch")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        if let Some(parent) = self.report_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.periodic_threshold_secs, 30.0);
        assert_eq!(config.periodic_tolerance_secs, 0.5);
        assert_eq!(config.continuous_movement_threshold_secs, 300.0);
        assert_eq!(config.min_movement_distance, 5.0);
        assert_eq!(config.history_capacity, 1000);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.history_capacity, config.history_capacity);
        assert_eq!(back.report_path, config.report_path);
    }
}
