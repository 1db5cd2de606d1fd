//! Arena configuration
//!
//! Loaded from TOML or RON through the engine's [`Config`] trait. Every
//! section is optional; missing values fall back to the defaults below.

use serde::{Deserialize, Serialize};
use sweep_engine::core::{ApplicationConfig, Config, ConfigError};

/// Complete arena configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Engine and collision pass settings
    pub app: ApplicationConfig,

    /// Arena bounds
    pub arena: ArenaSettings,

    /// Ball spawning
    pub balls: BallSettings,

    /// Simulation length
    pub run: RunSettings,
}

/// Walled rectangle the balls bounce around in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Width in world units
    pub width: f32,
    /// Height in world units
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 60.0,
        }
    }
}

/// How many balls to spawn and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    /// Number of balls
    pub count: u32,
    /// Smallest radius
    pub min_radius: f32,
    /// Largest radius
    pub max_radius: f32,
    /// Largest initial speed in units per second
    pub max_speed: f32,
    /// Seed for placement and velocities
    pub seed: u64,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            count: 12,
            min_radius: 1.0,
            max_radius: 3.0,
            max_speed: 400.0,
            seed: 7,
        }
    }
}

/// How long to simulate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Number of fixed steps
    pub steps: u32,
    /// Log a summary every this many steps (0 = never)
    pub report_every: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            steps: 600,
            report_every: 60,
        }
    }
}

impl Config for ArenaConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;

        let arena = &self.arena;
        if !(arena.width.is_finite() && arena.height.is_finite() && arena.width > 0.0 && arena.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Arena must have a positive size, got {} x {}",
                arena.width, arena.height
            )));
        }

        let balls = &self.balls;
        if !(balls.min_radius > 0.0 && balls.min_radius <= balls.max_radius) {
            return Err(ConfigError::Invalid(format!(
                "Ball radius range is empty: {}..={}",
                balls.min_radius, balls.max_radius
            )));
        }
        if balls.max_radius * 2.0 >= arena.width.min(arena.height) {
            return Err(ConfigError::Invalid(format!(
                "Balls of radius {} do not fit in the arena",
                balls.max_radius
            )));
        }
        if !(balls.max_speed.is_finite() && balls.max_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Max speed must be finite and >= 0, got {}",
                balls.max_speed
            )));
        }

        Ok(())
    }
}
