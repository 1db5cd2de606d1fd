//! Debugging aids for the collision pass

pub mod collision_trace;

pub use collision_trace::CollisionTrace;
