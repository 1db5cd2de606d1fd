//! # Sweep Engine
//!
//! Continuous 2D collision detection and response.
//!
//! ## Features
//!
//! - **Swept Tests**: Circle/circle and circle/segment contacts found at the
//!   exact time of first touch, so fast movers never tunnel
//! - **Time-Ordered Resolution**: Contacts are resolved earliest first and
//!   re-swept whenever a response changes an entity mid-step
//! - **Response Callbacks**: Any number of callbacks per collider, each with
//!   mutable access to the world
//! - **ECS Storage**: Slotmap-backed entities with transform, collider and
//!   movement components
//! - **Configuration**: TOML or RON, via serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sweep_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!
//!     let ball = world.create_entity();
//!     world.insert_transform(ball, TransformComponent::moving(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0)))?;
//!     world.insert_collider(
//!         ball,
//!         ColliderComponent::circle(1.0).on_collision(|collision, world| {
//!             let mut changed = ChangedEntities::new();
//!             if let Some(transform) = world.transform_mut(collision.entity) {
//!                 // Stop at the contact point
//!                 transform.redirect(collision.position, collision.position);
//!                 changed.insert(collision.entity);
//!             }
//!             changed
//!         }),
//!     )?;
//!
//!     let post = world.create_entity();
//!     world.insert_transform(post, TransformComponent::from_position(Vec2::new(0.0, 10.0)))?;
//!     world.insert_collider(post, ColliderComponent::circle(1.0))?;
//!
//!     let mut collisions = CollisionSystem::new(CollisionConfig::default());
//!     collisions.advance(&mut world)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod ecs;
pub mod physics;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{ApplicationConfig, CollisionConfig, Config, ConfigError, EngineConfig},
        debug::CollisionTrace,
        ecs::{
            components::{ColliderComponent, MovementComponent, TransformComponent},
            systems::MovementSystem,
            Entity, World, WorldError,
        },
        foundation::math::{Vec2, EPSILON},
        physics::{
            ChangedEntities, ColliderShape, Collision, CollisionCallback, CollisionError, CollisionSystem,
            PassStats, ShapeKind, TransformProvider,
        },
    };
}
