//! ECS World implementation

use slotmap::{SecondaryMap, SlotMap};

use super::components::{ColliderComponent, MovementComponent, TransformComponent};
use super::Entity;
use crate::foundation::math::{rotate, Vec2};
use crate::physics::collision::ColliderShape;
use crate::physics::TransformProvider;

/// Errors raised while attaching components
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The entity was never created or has been despawned
    #[error("Entity {0:?} does not exist")]
    NoSuchEntity(Entity),

    /// Colliders need a transform to be placed in the world
    #[error("Entity {0:?} has no transform; attach a TransformComponent before its collider")]
    MissingTransform(Entity),

    /// The collider's shape has nonsensical dimensions
    #[error("Invalid shape on entity {entity:?}: {reason}")]
    InvalidShape {
        /// The entity the collider was meant for
        entity: Entity,
        /// What is wrong with the shape
        reason: String,
    },
}

/// ECS World containing all entities and components
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<Entity, ()>,
    transforms: SecondaryMap<Entity, TransformComponent>,
    colliders: SecondaryMap<Entity, ColliderComponent>,
    movements: SecondaryMap<Entity, MovementComponent>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Remove an entity and all of its components
    ///
    /// Returns false if the entity was already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        self.transforms.remove(entity);
        self.colliders.remove(entity);
        self.movements.remove(entity);
        true
    }

    /// Whether the entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Iterate over all entities in creation-slot order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Attach or replace an entity's transform
    pub fn insert_transform(&mut self, entity: Entity, transform: TransformComponent) -> Result<(), WorldError> {
        if !self.contains(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        self.transforms.insert(entity, transform);
        Ok(())
    }

    /// Get an entity's transform
    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.transforms.get(entity)
    }

    /// Get an entity's transform mutably
    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.transforms.get_mut(entity)
    }

    /// Detach an entity's transform
    ///
    /// A collider left behind makes the next collision pass fail validation.
    pub fn remove_transform(&mut self, entity: Entity) -> Option<TransformComponent> {
        self.transforms.remove(entity)
    }

    /// Attach or replace an entity's collider
    ///
    /// The entity must already have a transform and the shape must be valid.
    pub fn insert_collider(&mut self, entity: Entity, collider: ColliderComponent) -> Result<(), WorldError> {
        if !self.contains(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        if !self.transforms.contains_key(entity) {
            return Err(WorldError::MissingTransform(entity));
        }
        collider
            .shape
            .validate()
            .map_err(|reason| WorldError::InvalidShape { entity, reason })?;

        self.colliders.insert(entity, collider);
        Ok(())
    }

    /// Detach an entity's collider
    pub fn remove_collider(&mut self, entity: Entity) -> Option<ColliderComponent> {
        self.colliders.remove(entity)
    }

    /// Get an entity's collider
    pub fn collider(&self, entity: Entity) -> Option<&ColliderComponent> {
        self.colliders.get(entity)
    }

    /// Get an entity's collider mutably
    pub fn collider_mut(&mut self, entity: Entity) -> Option<&mut ColliderComponent> {
        self.colliders.get_mut(entity)
    }

    /// Entities that have a collider, in creation-slot order
    pub fn collider_entities(&self) -> Vec<Entity> {
        self.colliders.keys().collect()
    }

    /// Whether the entity has a collider that is currently enabled
    pub fn is_collider_enabled(&self, entity: Entity) -> bool {
        self.colliders.get(entity).is_some_and(|collider| collider.enabled)
    }

    /// Enable or disable an entity's collider; returns false if it has none
    pub fn set_collider_enabled(&mut self, entity: Entity, enabled: bool) -> bool {
        match self.colliders.get_mut(entity) {
            Some(collider) => {
                collider.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    /// Attach or replace an entity's movement
    pub fn insert_movement(&mut self, entity: Entity, movement: MovementComponent) -> Result<(), WorldError> {
        if !self.contains(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        self.movements.insert(entity, movement);
        Ok(())
    }

    /// Get an entity's movement
    pub fn movement(&self, entity: Entity) -> Option<&MovementComponent> {
        self.movements.get(entity)
    }

    /// Get an entity's movement mutably
    pub fn movement_mut(&mut self, entity: Entity) -> Option<&mut MovementComponent> {
        self.movements.get_mut(entity)
    }

    /// Entities that have a movement component, in creation-slot order
    pub fn movement_entities(&self) -> Vec<Entity> {
        self.movements.keys().collect()
    }

    /// Entity origin that puts its collider's reference point at
    /// `collider_position`, using the anchor-time angle
    pub fn collider_origin(&self, entity: Entity, collider_position: Vec2) -> Option<Vec2> {
        let transform = self.transforms.get(entity)?;
        let collider = self.colliders.get(entity)?;
        Some(collider_position - rotate(&collider.offset, transform.angle))
    }

    fn placed(&self, entity: Entity) -> Option<(&TransformComponent, &ColliderComponent)> {
        Some((self.transforms.get(entity)?, self.colliders.get(entity)?))
    }
}

impl TransformProvider for World {
    fn collider_world_position(&self, entity: Entity) -> Option<Vec2> {
        let (transform, collider) = self.placed(entity)?;
        Some(transform.position + rotate(&collider.offset, transform.angle))
    }

    fn next_collider_world_position(&self, entity: Entity) -> Option<Vec2> {
        let (transform, collider) = self.placed(entity)?;
        Some(transform.next_position + rotate(&collider.offset, transform.next_angle))
    }

    fn is_movement_discrete(&self, entity: Entity) -> bool {
        self.transforms.get(entity).is_some_and(|transform| transform.discrete)
    }

    fn interpolated_global_position(&self, entity: Entity, fraction: f32) -> Option<Vec2> {
        let (transform, collider) = self.placed(entity)?;
        Some(transform.local_to_world(&collider.offset, fraction))
    }

    fn collider_world_shape(&self, entity: Entity) -> Option<ColliderShape> {
        let (transform, collider) = self.placed(entity)?;
        let angle = if transform.discrete { transform.next_angle } else { transform.angle };
        Some(collider.shape.oriented(angle))
    }
}
