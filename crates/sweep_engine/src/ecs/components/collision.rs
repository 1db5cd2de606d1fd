//! Collision components for ECS
//!
//! A collider is pure configuration plus the list of callbacks that want to
//! hear about its collisions. Where the shape actually is comes from the
//! entity's [`TransformComponent`](super::TransformComponent).

use std::fmt;

use crate::ecs::World;
use crate::foundation::math::Vec2;
use crate::physics::collision::{ChangedEntities, ColliderShape, Collision, CollisionCallback, ShapeKind};

/// Component that gives an entity a collision shape
pub struct ColliderComponent {
    /// The collision shape (circle or line segment), in local space
    pub shape: ColliderShape,

    /// Translation from the entity's origin to the shape's reference point,
    /// in local space (rotates with the entity)
    pub offset: Vec2,

    /// Disabled colliders take part in no collisions, effective immediately
    /// even in the middle of a collision pass
    pub enabled: bool,

    /// Response callbacks, invoked in registration order
    callbacks: Vec<Box<dyn CollisionCallback>>,
}

impl ColliderComponent {
    /// Create an enabled collider with no offset and no callbacks
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vec2::zeros(),
            enabled: true,
            callbacks: Vec::new(),
        }
    }

    /// Circle collider
    pub fn circle(radius: f32) -> Self {
        Self::new(ColliderShape::circle(radius))
    }

    /// Line segment collider from its start-to-end vector
    pub fn line(vector: Vec2) -> Self {
        Self::new(ColliderShape::line(vector))
    }

    /// Builder pattern: Set the offset from the entity origin
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Builder pattern: Register a callback
    pub fn with_callback(mut self, callback: impl CollisionCallback + 'static) -> Self {
        self.add_callback(callback);
        self
    }

    /// Builder pattern: Register a closure as a callback
    pub fn on_collision<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Collision, &mut World) -> ChangedEntities + 'static,
    {
        self.add_callback(callback);
        self
    }

    /// Register a callback; it runs after every callback registered before it
    pub fn add_callback(&mut self, callback: impl CollisionCallback + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Enable or disable the collider
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Borrow the callbacks out so they can run with mutable world access
    pub(crate) fn take_callbacks(&mut self) -> Vec<Box<dyn CollisionCallback>> {
        std::mem::take(&mut self.callbacks)
    }

    /// Put borrowed callbacks back in front of any registered while they ran
    pub(crate) fn restore_callbacks(&mut self, mut callbacks: Vec<Box<dyn CollisionCallback>>) {
        callbacks.append(&mut self.callbacks);
        self.callbacks = callbacks;
    }
}

impl fmt::Debug for ColliderComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColliderComponent")
            .field("shape", &self.shape)
            .field("offset", &self.offset)
            .field("enabled", &self.enabled)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
