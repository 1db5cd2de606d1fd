//! Recorder for collisions resolved during a pass
//!
//! Enabled through [`CollisionConfig::record_trace`](crate::core::CollisionConfig).
//! Each delivered event is stored once, as seen by the first entity of its pair.

use crate::ecs::Entity;
use crate::physics::collision::Collision;

/// Ordered log of the collisions delivered by the last pass
#[derive(Debug, Clone, Default)]
pub struct CollisionTrace {
    events: Vec<Collision>,
}

impl CollisionTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delivered collision
    pub fn record(&mut self, collision: Collision) {
        self.events.push(collision);
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Recorded collisions in delivery order
    pub fn events(&self) -> &[Collision] {
        &self.events
    }

    /// Number of recorded collisions
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Collisions involving `entity`, oriented so `entity` is the receiver
    pub fn involving(&self, entity: Entity) -> Vec<Collision> {
        self.events
            .iter()
            .filter_map(|event| {
                if event.entity == entity {
                    Some(*event)
                } else if event.other == entity {
                    Some(event.inverted())
                } else {
                    None
                }
            })
            .collect()
    }

    /// First collision between two entities, as seen by `entity`
    pub fn first_between(&self, entity: Entity, other: Entity) -> Option<Collision> {
        self.involving(entity).into_iter().find(|event| event.other == other)
    }
}
