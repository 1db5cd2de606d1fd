//! Continuous collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - Line intersection and projection building blocks
//! - [`swept`] - Swept circle/circle and circle/segment tests
//! - [`shape`] - Local-space collider shapes
//! - [`event`] - Collision payloads and response callbacks
//!
//! # Key Types
//!
//! - [`ColliderShape`] - Closed set of supported shapes (circle, line)
//! - [`SweptHit`] - Time and normal of the first contact in an interval
//! - [`Collision`] - What a response callback is told about a contact

pub mod primitives;
pub mod swept;
pub mod shape;
pub mod event;

// Re-export commonly used types
pub use primitives::{segment_intersection, project_point_onto_line, LineProjection, SegmentIntersection};
pub use swept::{sweep, circle_vs_circle, circle_vs_line, circle_vs_point, SweptHit, SweptShape};
pub use shape::{ColliderShape, ShapeKind};
pub use event::{ChangedEntities, Collision, CollisionCallback};
