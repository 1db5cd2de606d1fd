//! Swept (continuous) shape tests
//!
//! Every test reduces the problem to one moving shape against one stationary
//! shape: the caller passes the *relative* velocity over the interval, and
//! times come back as a fraction of that interval in `[0, 1]`.
//!
//! Circle vs circle uses the closest-approach / right-triangle construction
//! from Gomez, "Pool Hall Lessons" (Gamasutra, 2000). Circle vs segment
//! reduces to a distance-over-speed solve against the segment's line and
//! falls back to circle vs endpoint when the path misses the segment body.

use super::primitives::{project_point_onto_line, segment_intersection, SegmentIntersection};
use super::shape::ColliderShape;
use crate::foundation::math::{perp, try_normalize, Vec2};

/// Earliest contact found by a swept test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweptHit {
    /// Fraction of the interval at which the shapes first touch
    pub time: f32,
    /// Unit vector pointing from the moving shape toward the stationary one
    pub normal: Vec2,
}

impl SweptHit {
    /// A hit for shapes that already overlap at the start of the interval
    pub fn immediate(normal: Vec2) -> Self {
        Self { time: 0.0, normal }
    }

    /// The same contact seen from the other shape
    pub fn inverted(self) -> Self {
        Self {
            time: self.time,
            normal: -self.normal,
        }
    }
}

/// A shape placed in world space together with its path over the interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweptShape {
    /// World-oriented shape
    pub shape: ColliderShape,
    /// Reference point at the start of the interval
    pub start: Vec2,
    /// Reference point at the end of the interval
    pub end: Vec2,
}

impl SweptShape {
    /// Displacement over the interval
    pub fn displacement(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Dispatch a swept test on the pair of shape kinds
///
/// Returns `None` for pairs without a swept test (line vs line) as well as
/// for pairs that never touch.
pub fn sweep(a: &SweptShape, b: &SweptShape) -> Option<SweptHit> {
    let relative_velocity = a.displacement() - b.displacement();

    match (a.shape, b.shape) {
        (ColliderShape::Circle { radius: radius_a }, ColliderShape::Circle { radius: radius_b }) => {
            circle_vs_circle(a.start, radius_a, b.start, radius_b, relative_velocity)
        }
        (ColliderShape::Circle { radius }, ColliderShape::Line { vector }) => {
            circle_vs_line(a.start, radius, b.start, b.start + vector, relative_velocity)
        }
        (ColliderShape::Line { vector }, ColliderShape::Circle { radius }) => {
            circle_vs_line(b.start, radius, a.start, a.start + vector, -relative_velocity)
                .map(SweptHit::inverted)
        }
        (ColliderShape::Line { .. }, ColliderShape::Line { .. }) => None,
    }
}

/// Moving circle A against stationary circle B
///
/// `velocity` is A's motion relative to B over the whole interval.
pub fn circle_vs_circle(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
    velocity: Vec2,
) -> Option<SweptHit> {
    let offset = center_b - center_a;
    let radius_sum = radius_a + radius_b;
    let radius_sum_squared = radius_sum * radius_sum;
    let distance_squared = offset.norm_squared();

    if distance_squared < radius_sum_squared {
        let normal = try_normalize(&offset)
            .or_else(|| try_normalize(&velocity))
            .unwrap_or_else(Vec2::x);
        return Some(SweptHit::immediate(normal));
    }

    let speed = velocity.norm();
    if speed <= 0.0 {
        return None;
    }

    // Even a head-on approach cannot close the gap
    let distance = distance_squared.sqrt();
    if speed < distance - radius_sum {
        return None;
    }

    let direction = velocity / speed;
    let closing = direction.dot(&offset);
    if closing <= 0.0 {
        return None;
    }

    // Squared distance between B's centre and A's path at closest approach
    let closest_squared = distance_squared - closing * closing;
    if closest_squared >= radius_sum_squared {
        return None;
    }

    let travel = closing - (radius_sum_squared - closest_squared).sqrt();
    if travel > speed {
        return None;
    }

    let time = (travel / speed).clamp(0.0, 1.0);
    let contact_a = center_a + velocity * time;
    let normal = try_normalize(&(center_b - contact_a)).unwrap_or(direction);
    Some(SweptHit { time, normal })
}

/// Moving circle against a stationary point (a zero-radius circle)
pub fn circle_vs_point(center: Vec2, radius: f32, point: Vec2, velocity: Vec2) -> Option<SweptHit> {
    circle_vs_circle(center, radius, point, 0.0, velocity)
}

/// Moving circle against the stationary segment `line_start..line_end`
///
/// `velocity` is the circle's motion relative to the segment over the
/// whole interval.
pub fn circle_vs_line(
    center: Vec2,
    radius: f32,
    line_start: Vec2,
    line_end: Vec2,
    velocity: Vec2,
) -> Option<SweptHit> {
    // Already touching the segment (the clamped projection is the closest point)
    let projection = project_point_onto_line(center, line_start, line_end);
    let closest = line_start + (line_end - line_start) * projection.t.clamp(0.0, 1.0);
    let to_closest = closest - center;
    if to_closest.norm_squared() < radius * radius {
        let normal = try_normalize(&to_closest)
            .unwrap_or_else(|| facing_normal(line_start, line_end, velocity));
        return Some(SweptHit::immediate(normal));
    }

    match segment_intersection(center, center + velocity, line_start, line_end) {
        SegmentIntersection::Parallel => {
            let endpoint = nearest_unpassed_endpoint(center, velocity, line_start, line_end)?;
            circle_vs_point(center, radius, endpoint, velocity)
        }
        SegmentIntersection::Outside { u, .. } | SegmentIntersection::Intersecting { u, .. } => {
            if u < 0.0 {
                circle_vs_point(center, radius, line_start, velocity)
            } else if u > 1.0 {
                circle_vs_point(center, radius, line_end, velocity)
            } else {
                approach_segment(center, radius, line_start, line_end, velocity)
            }
        }
    }
}

/// The circle's path crosses the segment's line within the segment bounds:
/// solve for the moment its edge reaches the line.
fn approach_segment(
    center: Vec2,
    radius: f32,
    line_start: Vec2,
    line_end: Vec2,
    velocity: Vec2,
) -> Option<SweptHit> {
    let mut outward = try_normalize(&perp(&(line_end - line_start)))?;
    let mut distance = (center - line_start).dot(&outward);
    if distance < 0.0 {
        outward = -outward;
        distance = -distance;
    }

    let approach_speed = -velocity.dot(&outward);
    if approach_speed <= 0.0 {
        return None;
    }

    let gap = distance - radius;
    if gap < 0.0 {
        // Overlapping the infinite line beyond the segment's ends
        let projection = project_point_onto_line(center, line_start, line_end);
        let endpoint = if projection.t < 0.0 { line_start } else { line_end };
        return circle_vs_point(center, radius, endpoint, velocity);
    }

    if approach_speed < gap {
        return None;
    }

    let time = gap / approach_speed;
    let contact = project_point_onto_line(center + velocity * time, line_start, line_end);
    if !contact.within_segment() {
        // The edge reaches the line past an end; the end is what gets hit
        let endpoint = if contact.t < 0.0 { line_start } else { line_end };
        return circle_vs_point(center, radius, endpoint, velocity);
    }

    Some(SweptHit {
        time,
        normal: -outward,
    })
}

/// Pick the endpoint the circle is still heading toward, nearer one first
fn nearest_unpassed_endpoint(center: Vec2, velocity: Vec2, line_start: Vec2, line_end: Vec2) -> Option<Vec2> {
    let ahead = |point: Vec2| (point - center).dot(&velocity) > 0.0;

    match (ahead(line_start), ahead(line_end)) {
        (true, true) => {
            if (line_start - center).norm_squared() <= (line_end - center).norm_squared() {
                Some(line_start)
            } else {
                Some(line_end)
            }
        }
        (true, false) => Some(line_start),
        (false, true) => Some(line_end),
        (false, false) => None,
    }
}

/// Segment normal facing along the velocity, for a centre lying on the segment
fn facing_normal(line_start: Vec2, line_end: Vec2, velocity: Vec2) -> Vec2 {
    match try_normalize(&perp(&(line_end - line_start))) {
        Some(normal) if normal.dot(&velocity) < 0.0 => -normal,
        Some(normal) => normal,
        None => try_normalize(&velocity).unwrap_or_else(Vec2::x),
    }
}
