//! Configuration
//!
//! Every section has a `Default` carrying the reference pacing constants, so
//! an empty JSON object (or no file at all) is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roster::WeightPolicy;
use crate::{FRAME_RATE, IDLE_STEP_DEGREES, SPIN_DURATION_MS, WINNER_CUE_DELAY_MS};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Spin pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spin tween length (ms).
    pub spin_duration_ms: f64,
    /// Idle rotation per frame (degrees).
    pub idle_step_degrees: f64,
    /// Delay between settling and the winner cue (ms).
    pub winner_cue_delay_ms: f64,
    /// Fewest extra full turns per spin.
    pub min_extra_turns: u32,
    /// Most extra full turns per spin.
    pub max_extra_turns: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            idle_step_degrees: IDLE_STEP_DEGREES,
            winner_cue_delay_ms: WINNER_CUE_DELAY_MS,
            min_extra_turns: 3,
            max_extra_turns: 5,
        }
    }
}

impl EngineConfig {
    /// Check ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spin_duration_ms.is_finite() || self.spin_duration_ms <= 0.0 {
            return Err(invalid("engine.spin_duration_ms", "must be a positive number of ms"));
        }
        if !self.idle_step_degrees.is_finite() {
            return Err(invalid("engine.idle_step_degrees", "must be finite"));
        }
        if !self.winner_cue_delay_ms.is_finite() || self.winner_cue_delay_ms < 0.0 {
            return Err(invalid("engine.winner_cue_delay_ms", "must be a non-negative number of ms"));
        }
        if self.min_extra_turns == 0 {
            return Err(invalid("engine.min_extra_turns", "must be at least 1"));
        }
        if self.min_extra_turns > self.max_extra_turns {
            return Err(invalid(
                "engine.max_extra_turns",
                format!("{} is below min_extra_turns {}", self.max_extra_turns, self.min_extra_turns),
            ));
        }
        Ok(())
    }
}

/// Real-time service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Frames per second.
    pub frame_rate: u32,
    /// Command queue depth.
    pub command_buffer: usize,
    /// Event broadcast buffer.
    pub event_buffer: usize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            command_buffer: 32,
            event_buffer: 256,
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Check ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > 1000 {
            return Err(invalid("service.frame_rate", "must be within 1..=1000"));
        }
        if self.command_buffer == 0 {
            return Err(invalid("service.command_buffer", "must be at least 1"));
        }
        if self.event_buffer == 0 {
            return Err(invalid("service.event_buffer", "must be at least 1"));
        }
        Ok(())
    }

    /// Frame interval (ms).
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate.max(1) as f64
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Spin pacing.
    pub engine: EngineConfig,
    /// Adaptive weight policy for recorded winners.
    pub weights: WeightPolicy,
    /// Real-time service.
    pub service: ServiceConfig,
}

impl WheelConfig {
    /// Parse from a JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.weights
            .validate()
            .map_err(|reason| invalid("weights", reason))?;
        self.service.validate()
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference_values() {
        let config = WheelConfig::default();
        assert_eq!(config.engine.spin_duration_ms, 3500.0);
        assert_eq!(config.engine.idle_step_degrees, 0.3);
        assert_eq!(config.engine.winner_cue_delay_ms, 200.0);
        assert_eq!((config.engine.min_extra_turns, config.engine.max_extra_turns), (3, 5));
        assert_eq!(config.service.frame_rate, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = WheelConfig::from_json("{}").unwrap();
        assert_eq!(config, WheelConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = WheelConfig::from_json(
            r#"{ "engine": { "spin_duration_ms": 1200 }, "service": { "seed": 42 } }"#,
        )
        .unwrap();
        assert_eq!(config.engine.spin_duration_ms, 1200.0);
        assert_eq!(config.engine.max_extra_turns, 5);
        assert_eq!(config.service.seed, Some(42));
    }

    #[test]
    fn test_rejects_bad_turns() {
        let err = WheelConfig::from_json(r#"{ "engine": { "min_extra_turns": 6 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.max_extra_turns", .. }));

        let err = WheelConfig::from_json(r#"{ "engine": { "min_extra_turns": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.min_extra_turns", .. }));
    }

    #[test]
    fn test_rejects_bad_duration() {
        let err = WheelConfig::from_json(r#"{ "engine": { "spin_duration_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.spin_duration_ms", .. }));
    }

    #[test]
    fn test_rejects_bad_weight_policy() {
        let err = WheelConfig::from_json(r#"{ "weights": { "min_weight": 5.0, "max_weight": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "weights", .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(WheelConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = WheelConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
