//! Engine settings
//!
//! [`ApplicationConfig`] is what an application loads from disk. It nests
//! [`EngineConfig`] (log filter, debug output, step length) and
//! [`CollisionConfig`] (pass diagnostics). Every field has a default, so a
//! file only needs the values it changes.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Diagnostics for [`CollisionSystem`](crate::physics::CollisionSystem). None of
/// these settings change which collisions are detected or when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Log a warning once a single pass has run this many iterations.
    /// The pass is never cut short.
    pub warn_after_iterations: u32,
    /// Record every delivered collision into the pass trace
    pub record_trace: bool,
}

impl CollisionConfig {
    /// Create a collision configuration with defaults
    pub fn new() -> Self {
        Self {
            warn_after_iterations: 64,
            record_trace: false,
        }
    }

    /// Set the iteration count that triggers a non-convergence warning
    pub fn with_warn_after_iterations(mut self, iterations: u32) -> Self {
        self.warn_after_iterations = iterations;
        self
    }

    /// Enable or disable the collision trace
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.warn_after_iterations == 0 {
            return Err("warn_after_iterations must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Logging and stepping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `env_logger` filter used when no `RUST_LOG` is set
    pub log_level: String,
    /// Emit per-step diagnostics
    pub debug_mode: bool,
    /// Seconds of simulated time covered by one collision step
    pub fixed_timestep: f32,
}

impl EngineConfig {
    /// Defaults: `info`, debug output in debug builds, 60 steps per second
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Builder: log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Builder: per-step diagnostics
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Set the fixed timestep in seconds
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), String> {
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!("Unknown log level: {}", self.log_level));
        }

        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(format!(
                "Fixed timestep must be positive, got {}",
                self.fixed_timestep
            ));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Root of a configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// `[engine]` section
    pub engine: EngineConfig,
    /// `[collision]` section
    pub collision: CollisionConfig,
}

impl Config for ApplicationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate().map_err(ConfigError::Invalid)?;
        self.collision.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
