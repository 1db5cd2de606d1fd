//! Entity-Component storage
//!
//! The minimal world the collision pass runs against: entities, their 2D
//! transforms, colliders and movement.

pub mod world;
pub mod entity;
pub mod components;
pub mod systems;

pub use world::{World, WorldError};
pub use entity::Entity;
