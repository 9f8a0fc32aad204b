//! Configuration system for gasflow.
//!
//! Load model calibration and backend settings from TOML or YAML files
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use gasflow_config::AllocationConfig;
//!
//! let config = AllocationConfig::from_toml_str(r#"
//!     secondary_conversion = 0.001
//!
//!     [reporting]
//!     flow_decimals = 1
//!
//!     [backend]
//!     max_iterations = 400
//! "#).unwrap();
//!
//! assert_eq!(config.reporting.flow_decimals, 1);
//! assert_eq!(config.reporting.quality_decimals, 6);
//! assert_eq!(config.backend.max_iterations, 400);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use gasflow_config::AllocationConfig;
//!
//! let config = AllocationConfig::load("gasflow.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default tonnes of secondary resource per kilogram.
pub const DEFAULT_SECONDARY_CONVERSION: f64 = 0.001;

/// Default magnitude below which a quality sensitivity counts as zero.
pub const DEFAULT_DEGENERACY_THRESHOLD: f64 = 1e-10;

/// Main allocation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AllocationConfig {
    /// Converts `equivalence`-weighted gas flow into secondary-resource
    /// units (kilograms to tonnes in the reference shop).
    pub secondary_conversion: f64,

    /// Quality sensitivities smaller than this leave the flow domain of a
    /// furnace untouched.
    pub degeneracy_threshold: f64,

    /// Rounding of reported figures.
    pub reporting: ReportingConfig,

    /// LP backend settings.
    pub backend: BackendConfig,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            secondary_conversion: DEFAULT_SECONDARY_CONVERSION,
            degeneracy_threshold: DEFAULT_DEGENERACY_THRESHOLD,
            reporting: ReportingConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl AllocationConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// values outside their admissible range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the secondary conversion constant.
    pub fn with_secondary_conversion(mut self, k: f64) -> Self {
        self.secondary_conversion = k;
        self
    }

    /// Sets the degeneracy threshold.
    pub fn with_degeneracy_threshold(mut self, threshold: f64) -> Self {
        self.degeneracy_threshold = threshold;
        self
    }

    /// Sets the reporting precision for flows and for quality values.
    pub fn with_decimals(mut self, flow_decimals: u32, quality_decimals: u32) -> Self {
        self.reporting = ReportingConfig {
            flow_decimals,
            quality_decimals,
        };
        self
    }

    /// Sets the backend configuration.
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.secondary_conversion.is_finite() || self.secondary_conversion < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "secondary_conversion must be a non-negative number, got {}",
                self.secondary_conversion
            )));
        }
        if !self.degeneracy_threshold.is_finite() || self.degeneracy_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "degeneracy_threshold must be positive, got {}",
                self.degeneracy_threshold
            )));
        }
        self.backend.validate()
    }
}

/// Rounding applied to reported figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ReportingConfig {
    /// Decimals for flows, consumption, output and the objective.
    pub flow_decimals: u32,

    /// Decimals for quality values.
    pub quality_decimals: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            flow_decimals: 2,
            quality_decimals: 6,
        }
    }
}

/// LP backend configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BackendConfig {
    /// Maximum interior-point iterations.
    pub max_iterations: u32,

    /// Relative feasibility and optimality-gap tolerance.
    pub tolerance: f64,

    /// Wall-clock limit for one solve.
    pub time_limit_secs: Option<u64>,

    /// Print backend iteration output.
    pub verbose: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-8,
            time_limit_secs: None,
            verbose: false,
        }
    }
}

impl BackendConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "backend.max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "backend.tolerance must lie in (0, 1), got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
