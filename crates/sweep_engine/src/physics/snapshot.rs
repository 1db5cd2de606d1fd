//! Per-entity swept snapshots
//!
//! One [`EntityCache`] per collider per pass: where the collider starts and
//! ends its (possibly truncated) sweep, and from what time. Built once at the
//! start of a pass and refreshed in place only for entities a collision
//! response changed.

use crate::ecs::Entity;
use crate::foundation::math::{lerp_vec, utils, Vec2};
use crate::physics::collision::{ColliderShape, ShapeKind, SweptShape};
use crate::physics::TransformProvider;

/// Swept state of one entity's collider for the current pass
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCache {
    /// Owning entity
    pub entity: Entity,
    /// Shape oriented into world space
    pub shape: ColliderShape,
    /// Collider reference point at `start_time`
    pub start: Vec2,
    /// Collider reference point at the end of the step
    pub end: Vec2,
    /// Step-relative time the sweep starts from
    pub start_time: f32,
    /// Set once the entity (or its collider/transform) disappears mid-pass
    pub retired: bool,
}

impl EntityCache {
    /// Sample an entity's sweep, anchored at `start_time`
    ///
    /// A discrete entity starts and ends at its final position, so it is only
    /// ever tested where it lands.
    pub fn capture<P>(provider: &P, entity: Entity, start_time: f32) -> Option<Self>
    where
        P: TransformProvider + ?Sized,
    {
        let shape = provider.collider_world_shape(entity)?;
        let end = provider.next_collider_world_position(entity)?;
        let start = if provider.is_movement_discrete(entity) {
            end
        } else {
            provider.collider_world_position(entity)?
        };

        Some(Self {
            entity,
            shape,
            start,
            end,
            start_time,
            retired: false,
        })
    }

    /// Re-sample after the entity changed, anchoring the new sweep at `start_time`
    pub fn refresh<P>(&mut self, provider: &P, start_time: f32)
    where
        P: TransformProvider + ?Sized,
    {
        match Self::capture(provider, self.entity, start_time) {
            Some(fresh) => *self = fresh,
            None => {
                self.retired = true;
                self.start_time = start_time;
            }
        }
    }

    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// How far through this snapshot's own sweep the step time `time` lies
    pub fn local_fraction(&self, time: f32) -> f32 {
        utils::remaining_fraction(self.start_time, time)
    }

    /// Reference point at step time `time` (linear along the sweep)
    pub fn position_at(&self, time: f32) -> Vec2 {
        lerp_vec(&self.start, &self.end, self.local_fraction(time))
    }

    /// This sweep restricted to `[anchor, 1]`
    ///
    /// Sweeps anchored earlier than `anchor` have their start moved forward
    /// along the path so both sides of a pair cover the same interval.
    pub fn swept_from(&self, anchor: f32) -> SweptShape {
        let start = if anchor > self.start_time {
            self.position_at(anchor)
        } else {
            self.start
        };
        SweptShape {
            shape: self.shape,
            start,
            end: self.end,
        }
    }
}
