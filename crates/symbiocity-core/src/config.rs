//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `symbiocity-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring
//! the YAML structure, a loader, and validation of the timer periods.
//! Every field has a default, so a missing file or an empty document
//! yields a fully working configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but fails validation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Timer periods for the scheduler's recurring tasks.
    #[serde(default)]
    pub timers: TimerConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a timer period is zero.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML,
    /// or [`ConfigError::Invalid`] if a timer period is zero.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.timers.validate()?;
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility (sensor feed and weather).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per virtual unit in the async runner.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            step_interval_ms: default_step_interval_ms(),
        }
    }
}

/// Timer periods for the scheduler's recurring tasks, in virtual units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimerConfig {
    /// Period of the twin vitals refresh task.
    #[serde(default = "default_twin_refresh_period")]
    pub twin_refresh_period: u64,

    /// Units of staleness after which a refresh also regenerates the
    /// twin's environment sample.
    #[serde(default = "default_environment_refresh_after")]
    pub environment_refresh_after: u64,

    /// Period of the city time-of-day advance task.
    #[serde(default = "default_city_clock_period")]
    pub city_clock_period: u64,

    /// Delay between booking a trip and its departure.
    #[serde(default = "default_departure_delay")]
    pub departure_delay: u64,
}

impl TimerConfig {
    /// Check that every recurring period is at least one unit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.twin_refresh_period == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("timers.twin_refresh_period must be at least 1"),
            });
        }
        if self.city_clock_period == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("timers.city_clock_period must be at least 1"),
            });
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            twin_refresh_period: default_twin_refresh_period(),
            environment_refresh_after: default_environment_refresh_after(),
            city_clock_period: default_city_clock_period(),
            departure_delay: default_departure_delay(),
        }
    }
}

/// Simulation boundary parameters for the async runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop after this many virtual units (0 = unlimited).
    #[serde(default)]
    pub max_units: u64,

    /// Stop after this many wall-clock seconds (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_world_name() -> String {
    String::from("Symbiotic Digital City")
}

const fn default_seed() -> u64 {
    42
}

const fn default_step_interval_ms() -> u64 {
    1000
}

const fn default_twin_refresh_period() -> u64 {
    5
}

const fn default_environment_refresh_after() -> u64 {
    30
}

const fn default_city_clock_period() -> u64 {
    10
}

const fn default_departure_delay() -> u64 {
    2
}

fn default_log_level() -> String {
    String::from("info")
}
