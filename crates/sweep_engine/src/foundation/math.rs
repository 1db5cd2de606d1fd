//! Math utilities and types
//!
//! Provides the 2D vector types used by the collision engine, plus a handful
//! of helpers nalgebra does not ship for planar geometry.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D rotation type
pub type Rot2 = Rotation2<f32>;

/// Tolerance used when a comparison against zero must absorb rounding noise
pub const EPSILON: f32 = 1.0e-6;

/// Z component of the 3D cross product of two planar vectors
///
/// Positive when `b` is counter-clockwise from `a`, zero when they are parallel.
pub fn cross(a: &Vec2, b: &Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Counter-clockwise perpendicular of a vector (same length)
pub fn perp(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Rotate a vector by an angle in radians (counter-clockwise)
pub fn rotate(v: &Vec2, angle: f32) -> Vec2 {
    if angle == 0.0 {
        return *v;
    }
    Rot2::new(angle) * *v
}

/// Linear interpolation between two vectors
pub fn lerp_vec(a: &Vec2, b: &Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Normalize a vector, or return `None` when it is too short to have a direction
pub fn try_normalize(v: &Vec2) -> Option<Vec2> {
    v.try_normalize(EPSILON)
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Fraction of the way `t` lies through the span `[start, 1]`
    ///
    /// Returns 1 for a span that has collapsed to a point.
    pub fn remaining_fraction(start: f32, t: f32) -> f32 {
        let span = 1.0 - start;
        if span <= super::EPSILON {
            1.0
        } else {
            ((t - start) / span).clamp(0.0, 1.0)
        }
    }
}
