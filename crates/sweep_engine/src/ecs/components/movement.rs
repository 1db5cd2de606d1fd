//! Movement component for entities that move in the plane
//!
//! Velocity drives the end-of-step pose the collision pass sweeps toward;
//! see [`MovementSystem`](crate::ecs::systems::MovementSystem).

use crate::foundation::math::Vec2;

/// Component for entities that can move
#[derive(Debug, Clone, PartialEq)]
pub struct MovementComponent {
    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Angular velocity in radians per second
    pub angular_velocity: f32,

    /// Maximum speed limit (0 = no limit)
    pub max_speed: f32,

    /// Whether movement is enabled
    pub enabled: bool,
}

impl Default for MovementComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementComponent {
    /// Create a stationary movement component
    pub fn new() -> Self {
        Self {
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
            max_speed: 0.0,
            enabled: true,
        }
    }

    /// Create a movement component with initial velocity
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Builder pattern: Set angular velocity
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set velocity, respecting the speed limit
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.apply_speed_limit();
    }

    /// Set maximum speed
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.0);
        self.apply_speed_limit();
    }

    /// Enable or disable movement
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current speed
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    fn apply_speed_limit(&mut self) {
        if self.max_speed > 0.0 {
            let speed = self.speed();
            if speed > self.max_speed {
                self.velocity *= self.max_speed / speed;
            }
        }
    }
}
