//! Physics module
//!
//! Continuous (swept) collision detection and response.
//!
//! # Module Organization
//!
//! - [`collision`] - Shapes, swept geometry, collision payloads and callbacks
//! - [`provider`] - Where the pass gets collider poses from
//! - [`snapshot`] - Per-entity swept state for one pass
//! - [`potential`] - Candidate pairs and their cached contact times
//! - [`collision_system`] - The event loop that resolves contacts in time order

pub mod collision;
pub mod provider;
pub mod snapshot;
pub mod potential;
pub mod collision_system;

pub use collision::{ChangedEntities, ColliderShape, Collision, CollisionCallback, ShapeKind};
pub use provider::TransformProvider;
pub use snapshot::EntityCache;
pub use potential::{CollisionTime, PotentialCollision};
pub use collision_system::{CollisionError, CollisionSystem, PassStats};
