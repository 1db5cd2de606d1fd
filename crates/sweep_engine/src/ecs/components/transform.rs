//! Transform component for the ECS system
//!
//! Pure data component describing where an entity is now and where it will
//! be at the end of the current simulation step. The collision pass sweeps
//! each collider along the straight path between the two.

use crate::foundation::math::{lerp_vec, rotate, utils, Vec2};

/// ECS Transform component
///
/// `position`/`angle` describe the entity at its anchor time: the start of the
/// step, or the time of the last collision that changed it. `next_position`/
/// `next_angle` describe it at the end of the step.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position at the anchor time
    pub position: Vec2,

    /// Rotation in radians (counter-clockwise) at the anchor time
    pub angle: f32,

    /// World space position at the end of the step
    pub next_position: Vec2,

    /// Rotation in radians at the end of the step
    pub next_angle: f32,

    /// Teleport instead of moving: only the final pose takes part in
    /// collision detection
    pub discrete: bool,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            angle: 0.0,
            next_position: Vec2::zeros(),
            next_angle: 0.0,
            discrete: false,
        }
    }
}

impl TransformComponent {
    /// Stationary transform at a position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            next_position: position,
            ..Default::default()
        }
    }

    /// Transform moving from `position` to `next_position` over the step
    pub fn moving(position: Vec2, next_position: Vec2) -> Self {
        Self {
            position,
            next_position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set the end-of-step position
    pub fn with_next_position(mut self, next_position: Vec2) -> Self {
        self.next_position = next_position;
        self
    }

    /// Builder pattern: Set both current and end-of-step angle
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self.next_angle = angle;
        self
    }

    /// Builder pattern: Teleport to the next pose instead of sweeping
    pub fn as_discrete(mut self) -> Self {
        self.discrete = true;
        self
    }

    /// Displacement over the rest of the step
    pub fn displacement(&self) -> Vec2 {
        self.next_position - self.position
    }

    /// Position and angle at `fraction` of the way from the anchor pose to
    /// the end pose. Discrete transforms are always at their end pose.
    pub fn interpolate(&self, fraction: f32) -> (Vec2, f32) {
        if self.discrete {
            return (self.next_position, self.next_angle);
        }
        (
            lerp_vec(&self.position, &self.next_position, fraction),
            utils::lerp(self.angle, self.next_angle, fraction),
        )
    }

    /// World position of a point given in the entity's local space, at
    /// `fraction` of the way through the remaining path
    pub fn local_to_world(&self, local: &Vec2, fraction: f32) -> Vec2 {
        let (position, angle) = self.interpolate(fraction);
        position + rotate(local, angle)
    }

    /// Re-anchor the path: the entity is now at `position` and will end the
    /// step at `next_position`
    ///
    /// This is what a collision response calls after moving the entity to the
    /// contact point.
    pub fn redirect(&mut self, position: Vec2, next_position: Vec2) {
        self.position = position;
        self.next_position = next_position;
    }

    /// Finish the step: the end pose becomes the current pose
    pub fn commit(&mut self) {
        self.position = self.next_position;
        self.angle = self.next_angle;
    }
}
