//! Startup configuration, loaded once before the world is built.
//!
//! Everything here is fixed for the lifetime of the engine: capacity and
//! timing are pre-allocation inputs, not live-tunable knobs.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Runtime configuration.
///
/// All fields have defaults, so an empty TOML document is a valid config.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Fixed entity capacity; every table is pre-allocated to this size.
    pub capacity: usize,
    /// Simulation ticks per second.
    pub tick_hz: f64,
    /// Upper clamp on a single frame's wall-clock delta, in seconds.
    pub max_frame_dt: f64,
    /// Player movement speed in world units per second.
    pub player_speed: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            capacity: lantern_core::DEFAULT_CAPACITY,
            tick_hz: 60.0,
            max_frame_dt: 0.25,
            player_speed: 120.0,
        }
    }
}

impl RuntimeConfig {
    /// Parses a config from a TOML string and validates it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a TOML file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The fixed simulation step in seconds.
    #[inline]
    #[must_use]
    pub fn step(&self) -> f64 {
        1.0 / self.tick_hz
    }

    /// Checks the cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be non-zero".into()));
        }
        if self.capacity > u32::MAX as usize {
            return Err(ConfigError::Invalid(
                "capacity cannot exceed u32::MAX".into(),
            ));
        }
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(ConfigError::Invalid("tick_hz must be positive".into()));
        }
        if !self.max_frame_dt.is_finite() || self.max_frame_dt < self.step() {
            return Err(ConfigError::Invalid(
                "max_frame_dt must cover at least one simulation step".into(),
            ));
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err(ConfigError::Invalid(
                "player_speed must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config.capacity, lantern_core::DEFAULT_CAPACITY);
        assert!((config.tick_hz - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let config = RuntimeConfig::from_toml_str("capacity = 64\ntick_hz = 30.0").unwrap();
        assert_eq!(config.capacity, 64);
        assert!((config.step() - 1.0 / 30.0).abs() < 1e-12);
        // Untouched fields keep their defaults.
        assert!((config.max_frame_dt - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(RuntimeConfig::from_toml_str("capcity = 64").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(RuntimeConfig::from_toml_str("capacity = 0").is_err());
        assert!(RuntimeConfig::from_toml_str("tick_hz = -1.0").is_err());
        // A clamp smaller than one step would starve the simulation.
        assert!(RuntimeConfig::from_toml_str("max_frame_dt = 0.001").is_err());
    }
}
