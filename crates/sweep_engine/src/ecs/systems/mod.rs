//! ECS Systems module

pub mod movement_system;

pub use movement_system::MovementSystem;
