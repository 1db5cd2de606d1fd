//! Primitive line geometry
//!
//! Segment/segment intersection parameters and point-onto-line projection,
//! the two building blocks the swept tests in [`super::swept`] are made of.

use crate::foundation::math::{cross, Vec2};

/// Outcome of intersecting two segments `A` and `B`
///
/// `t` is the parameter along `A` (0 at its start, 1 at its end) and `u` the
/// parameter along `B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// Direction vectors are parallel or one segment has zero length;
    /// there is no usable solution.
    Parallel,
    /// The infinite lines cross, but outside at least one segment's bounds
    Outside {
        /// Parameter along A
        t: f32,
        /// Parameter along B
        u: f32,
    },
    /// The segments themselves cross
    Intersecting {
        /// Parameter along A
        t: f32,
        /// Parameter along B
        u: f32,
    },
}

impl SegmentIntersection {
    /// The `(t, u)` parameters where the infinite lines cross, if they do
    pub fn parameters(&self) -> Option<(f32, f32)> {
        match *self {
            Self::Parallel => None,
            Self::Outside { t, u } | Self::Intersecting { t, u } => Some((t, u)),
        }
    }

    /// True only when both segments contain the crossing point
    pub fn is_intersecting(&self) -> bool {
        matches!(self, Self::Intersecting { .. })
    }
}

/// Intersect segment `start_a..end_a` with segment `start_b..end_b`
///
/// Only an exactly zero cross product of the direction vectors counts as
/// parallel; nearly parallel lines produce (possibly huge) parameters.
pub fn segment_intersection(
    start_a: Vec2,
    end_a: Vec2,
    start_b: Vec2,
    end_b: Vec2,
) -> SegmentIntersection {
    let r = end_a - start_a;
    let s = end_b - start_b;
    let denom = cross(&r, &s);
    if denom == 0.0 {
        return SegmentIntersection::Parallel;
    }

    let offset = start_b - start_a;
    let t = cross(&offset, &s) / denom;
    let u = cross(&offset, &r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        SegmentIntersection::Intersecting { t, u }
    } else {
        SegmentIntersection::Outside { t, u }
    }
}

/// Projection of a point onto an infinite line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProjection {
    /// Scalar position along the line (0 at start, 1 at end); not clamped
    pub t: f32,
    /// The projected point itself
    pub point: Vec2,
}

impl LineProjection {
    /// Whether the projection lands between the line's two defining points
    pub fn within_segment(&self) -> bool {
        (0.0..=1.0).contains(&self.t)
    }
}

/// Project `point` onto the infinite line through `start` and `end`
///
/// A degenerate line (start == end) projects everything onto `start`.
pub fn project_point_onto_line(point: Vec2, start: Vec2, end: Vec2) -> LineProjection {
    let direction = end - start;
    let length_squared = direction.norm_squared();
    if length_squared == 0.0 {
        return LineProjection { t: 0.0, point: start };
    }

    let t = (point - start).dot(&direction) / length_squared;
    LineProjection {
        t,
        point: start + direction * t,
    }
}
