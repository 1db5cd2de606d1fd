//! The boundary between the collision pass and whoever owns entity poses
//!
//! The pass never reads transforms directly. It asks a provider where each
//! collider starts and ends the step, which lets the pose storage (and how
//! offsets and line vectors rotate with the entity) live elsewhere.

use crate::ecs::Entity;
use crate::foundation::math::Vec2;
use crate::physics::collision::ColliderShape;

/// Pose queries the collision pass needs, per entity
///
/// Every method returns `None` (or `false`) for entities without a
/// transform or collider.
pub trait TransformProvider {
    /// World position of the collider's reference point at the entity's
    /// anchor time (start of step, or its last re-anchoring)
    fn collider_world_position(&self, entity: Entity) -> Option<Vec2>;

    /// World position of the collider's reference point at the end of the step
    fn next_collider_world_position(&self, entity: Entity) -> Option<Vec2>;

    /// Whether the entity teleports to its end pose instead of sweeping
    fn is_movement_discrete(&self, entity: Entity) -> bool;

    /// World position of the collider's reference point at `fraction` of the
    /// way along the entity's remaining path
    fn interpolated_global_position(&self, entity: Entity, fraction: f32) -> Option<Vec2>;

    /// The collider's shape oriented into world space at the anchor pose
    fn collider_world_shape(&self, entity: Entity) -> Option<ColliderShape>;
}
