//! Collider shape descriptors
//!
//! Shapes are stored in the entity's local space and only oriented into
//! world space when a swept test needs them.

use crate::foundation::math::{rotate, Vec2};

/// Discriminant of a [`ColliderShape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Circle around the collider's reference point
    Circle,
    /// Line segment starting at the collider's reference point
    Line,
}

/// Collision shape types (stored in LOCAL SPACE)
///
/// A closed set: supporting another shape means adding its swept tests to
/// [`super::swept::sweep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Circle centred on the collider's reference point
    Circle {
        /// Radius, never negative
        radius: f32,
    },
    /// Segment from the reference point to reference point + `vector`
    Line {
        /// Segment end minus segment start
        vector: Vec2,
    },
}

impl ColliderShape {
    /// Creates a circle shape
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Creates a line segment shape from its local start-to-end vector
    pub fn line(vector: Vec2) -> Self {
        Self::Line { vector }
    }

    /// Creates a line segment shape from two local points
    ///
    /// Only the difference is kept; the collider offset should place `from`.
    pub fn segment(from: Vec2, to: Vec2) -> Self {
        Self::Line { vector: to - from }
    }

    /// Which variant this is
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Line { .. } => ShapeKind::Line,
        }
    }

    /// Check the shape's numbers describe a real shape
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::Circle { radius } => {
                if !radius.is_finite() || radius < 0.0 {
                    return Err(format!("circle radius must be finite and >= 0, got {}", radius));
                }
            }
            Self::Line { vector } => {
                if !(vector.x.is_finite() && vector.y.is_finite()) {
                    return Err(format!("line vector must be finite, got {:?}", vector));
                }
            }
        }
        Ok(())
    }

    /// Orient the shape by an entity's angle
    ///
    /// Circles are rotation invariant; line vectors rotate with the entity.
    pub fn oriented(&self, angle: f32) -> Self {
        match *self {
            Self::Circle { radius } => Self::Circle { radius },
            Self::Line { vector } => Self::Line { vector: rotate(&vector, angle) },
        }
    }

    /// Radius of a circle around the reference point that contains the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Self::Circle { radius } => radius,
            Self::Line { vector } => vector.norm(),
        }
    }
}
