//! Runtime error taxonomy.
//!
//! Faults that should stop startup are surfaced as errors here; in-tick
//! capacity conditions (pool exhaustion, phase overflow) are logged and
//! degraded instead, because a running simulation must not abort over a
//! skippable spawn.

use thiserror::Error;

/// Errors raised while loading or validating the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::RuntimeConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed values violate a runtime constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while bootstrapping or running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The caller-provided setup pass failed.
    #[error("engine setup failed: {0}")]
    Setup(String),
}
