//! Collision payloads and response callbacks
//!
//! Callbacks follow a register-and-notify pattern. Every callback on both
//! colliders hears about every resolved event, and each reports back which
//! entities it changed so the collision pass can re-sweep them.

use std::collections::HashSet;

use crate::ecs::{Entity, World};
use crate::foundation::math::Vec2;

/// Entities a callback moved, redirected or otherwise changed
pub type ChangedEntities = HashSet<Entity>;

/// One resolved contact, as seen by `entity`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// The entity receiving this event
    pub entity: Entity,
    /// The entity it touched
    pub other: Entity,
    /// When contact happens, as a fraction of the whole step in `[0, 1]`
    pub time: f32,
    /// World position of `entity`'s collider at the contact instant
    pub position: Vec2,
    /// World position of `other`'s collider at the contact instant
    pub other_position: Vec2,
    /// Unit vector from `entity` toward `other` at contact
    pub normal: Vec2,
}

impl Collision {
    /// The same contact as seen by `other`
    pub fn inverted(&self) -> Self {
        Self {
            entity: self.other,
            other: self.entity,
            time: self.time,
            position: self.other_position,
            other_position: self.position,
            normal: -self.normal,
        }
    }

    /// Fraction of the step left after the contact
    pub fn remaining(&self) -> f32 {
        (1.0 - self.time).max(0.0)
    }
}

/// Response to a resolved collision
///
/// Callbacks run synchronously inside the collision pass with full access to
/// the [`World`]. An entity returned as changed is re-swept from the event time
/// starting at its transform's current `position`, so a callback that changes
/// a path must first move `position` to where the entity is at the contact
/// (see [`TransformComponent::redirect`](crate::ecs::components::TransformComponent::redirect)).
///
/// Callbacks must not start another collision pass.
pub trait CollisionCallback {
    /// Handle a collision, returning every entity this callback changed
    fn on_collision(&mut self, collision: &Collision, world: &mut World) -> ChangedEntities;
}

impl<F> CollisionCallback for F
where
    F: FnMut(&Collision, &mut World) -> ChangedEntities,
{
    fn on_collision(&mut self, collision: &Collision, world: &mut World) -> ChangedEntities {
        self(collision, world)
    }
}
