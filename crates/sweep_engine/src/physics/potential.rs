//! Candidate collision pairs
//!
//! Every unordered pair of snapshots gets one [`PotentialCollision`]. Its time
//! is cached across iterations of a pass and recomputed only when one of the
//! two participants changes.

use crate::foundation::math::Vec2;
use crate::physics::collision::sweep;
use crate::physics::snapshot::EntityCache;

/// When (if ever) a pair of colliders first touches during the step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CollisionTime {
    /// Not computed yet, or invalidated by a change
    #[default]
    Unknown,
    /// The pair does not touch during the rest of the step
    Never,
    /// First contact, as a fraction of the whole step in `[0, 1]`
    At(f32),
}

impl CollisionTime {
    /// The contact time, if there is one
    pub fn at(self) -> Option<f32> {
        match self {
            Self::At(time) => Some(time),
            Self::Unknown | Self::Never => None,
        }
    }

    /// Whether this needs computing before it can be used
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Ordering key: contacts by time, everything else last
    pub(crate) fn sort_key(self) -> f32 {
        self.at().unwrap_or(f32::INFINITY)
    }
}

/// Map a time measured over `[anchor, 1]` back onto the whole step
pub fn rebased_time(anchor: f32, raw: f32) -> f32 {
    anchor + (1.0 - anchor) * raw
}

/// Two snapshots that might collide this step
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialCollision {
    /// Index of the first snapshot (earlier in enumeration order)
    pub first: usize,
    /// Index of the second snapshot
    pub second: usize,
    /// Cached contact time
    pub time: CollisionTime,
    /// Contact normal from `first` toward `second`; meaningless without a time
    pub normal: Vec2,
    /// Whether the cached contact has already been handed to callbacks
    pub delivered: bool,
}

impl PotentialCollision {
    /// Pair two snapshot indices with an uncomputed time
    pub fn new(first: usize, second: usize) -> Self {
        Self {
            first,
            second,
            time: CollisionTime::Unknown,
            normal: Vec2::zeros(),
            delivered: false,
        }
    }

    /// Whether either participant is the snapshot at `index`
    pub fn involves(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }

    /// Recompute the contact time from the current snapshots
    ///
    /// The two sweeps are restricted to the later of their anchor times, and
    /// the result is rebased onto the whole step so times from different
    /// iterations compare directly.
    pub fn compute(&mut self, caches: &[EntityCache]) {
        self.delivered = false;
        self.normal = Vec2::zeros();

        let (Some(a), Some(b)) = (caches.get(self.first), caches.get(self.second)) else {
            self.time = CollisionTime::Never;
            return;
        };
        if a.retired || b.retired {
            self.time = CollisionTime::Never;
            return;
        }

        let anchor = a.start_time.max(b.start_time);
        self.time = match sweep(&a.swept_from(anchor), &b.swept_from(anchor)) {
            Some(hit) => {
                self.normal = hit.normal;
                CollisionTime::At(rebased_time(anchor, hit.time).clamp(0.0, 1.0))
            }
            None => CollisionTime::Never,
        };
    }
}
