//! ECS Components module
//!
//! Contains the components the collision pass reads and writes

pub mod transform;
pub mod movement;
pub mod collision;

pub use transform::TransformComponent;
pub use movement::MovementComponent;
pub use collision::ColliderComponent;
