//! System configuration parameters
//!
//! All tunable parameters for the room controller. Read once at startup
//! (defaults or a JSON file) and replaceable at runtime through
//! [`AppCommand::UpdateConfig`](crate::app::commands::AppCommand).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::climate::FallbackPolicy;
use crate::error::ConfigError;
use crate::fuzzy::DefuzzMethod;

/// Upper bound for every `*_decimals` field.
pub const MAX_DECIMALS: usize = 6;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Timing ---
    /// Seconds between two sensor polls
    pub poll_interval_secs: u32,

    // --- Rounding ---
    /// Decimals kept on sensor readings before inference
    pub reading_decimals: usize,
    /// Decimals kept on controller outputs before scaling to percent
    pub potency_decimals: usize,
    /// Decimals shown for potency in reports
    pub display_decimals: usize,

    // --- Inference ---
    pub defuzzification: DefuzzMethod,
    /// Applied to outputs for which no rule fired
    pub no_rule_fallback: FallbackPolicy,

    // --- Sensors ---
    /// Humidity used while no humidity sensor is fitted (%)
    pub default_humidity_percent: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,

            reading_decimals: 2,
            potency_decimals: 2,
            display_decimals: 0,

            defuzzification: DefuzzMethod::Centroid,
            no_rule_fallback: FallbackPolicy::HoldLast,

            default_humidity_percent: 75.0,
        }
    }
}

impl SystemConfig {
    /// Reject out-of-range fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid("poll_interval_secs must be > 0"));
        }
        if self.reading_decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid("reading_decimals must be <= 6"));
        }
        if self.potency_decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid("potency_decimals must be <= 6"));
        }
        if self.display_decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid("display_decimals must be <= 6"));
        }
        if !(0.0..=100.0).contains(&self.default_humidity_percent) {
            return Err(ConfigError::Invalid(
                "default_humidity_percent must be within 0..=100",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}
