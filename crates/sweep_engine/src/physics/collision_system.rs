//! Continuous collision detection and response
//!
//! One call to [`CollisionSystem::advance`] runs a whole collision pass for
//! the current step. Every collider sweeps from its transform's `position` to
//! its `next_position`; contacts are resolved earliest first by handing them
//! to the colliders' callbacks, and anything a callback changes is re-swept
//! from the contact time onward. The pass ends when an iteration resolves
//! nothing that changes an entity.
//!
//! There is no broad phase: all pairs of colliders are tested.

use std::collections::{HashMap, HashSet};

use crate::core::CollisionConfig;
use crate::debug::CollisionTrace;
use crate::ecs::{Entity, World};
use crate::physics::collision::{ChangedEntities, Collision};
use crate::physics::potential::{CollisionTime, PotentialCollision};
use crate::physics::snapshot::EntityCache;
use crate::physics::TransformProvider;

/// Problems that stop a pass before any callback runs
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// A collider's entity has no transform to sweep
    #[error("Entity {0:?} has a collider but no transform")]
    MissingTransform(Entity),

    /// A collider's shape cannot be swept
    #[error("Entity {entity:?} has an invalid collider shape: {reason}")]
    InvalidShape {
        /// Owner of the bad collider
        entity: Entity,
        /// What is wrong with the shape
        reason: String,
    },
}

/// Counters describing the most recent pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Iterations of the event loop
    pub iterations: u32,
    /// Candidate pairs tested (all unordered collider pairs)
    pub pairs: usize,
    /// Pair times computed, including the initial computation
    pub recomputations: usize,
    /// Events handed to callbacks
    pub events_resolved: usize,
}

/// Swept collision pass over every collider in a [`World`]
#[derive(Debug, Default)]
pub struct CollisionSystem {
    config: CollisionConfig,
    stats: PassStats,
    trace: CollisionTrace,
}

impl CollisionSystem {
    /// Create a collision system
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            config,
            stats: PassStats::default(),
            trace: CollisionTrace::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Statistics of the last completed pass
    pub fn last_stats(&self) -> PassStats {
        self.stats
    }

    /// Collisions delivered by the last pass, when tracing is enabled
    pub fn trace(&self) -> &CollisionTrace {
        &self.trace
    }

    /// Check every collider can take part in a pass
    pub fn validate(&self, world: &World) -> Result<(), CollisionError> {
        for entity in world.collider_entities() {
            let Some(collider) = world.collider(entity) else {
                continue;
            };
            if world.transform(entity).is_none() {
                return Err(CollisionError::MissingTransform(entity));
            }
            collider
                .shape
                .validate()
                .map_err(|reason| CollisionError::InvalidShape { entity, reason })?;
        }
        Ok(())
    }

    /// Run the collision pass for the current step
    ///
    /// Validation happens up front: on error no snapshot is built and no
    /// callback runs. Otherwise the pass runs until callbacks stop reporting
    /// changes; a callback that always reports a change never lets it finish.
    /// Colliders attached during the pass join the next one.
    pub fn advance(&mut self, world: &mut World) -> Result<(), CollisionError> {
        self.validate(world)?;

        self.trace.clear();
        self.stats = PassStats::default();

        let mut caches: Vec<EntityCache> = world
            .collider_entities()
            .into_iter()
            .filter_map(|entity| EntityCache::capture(world, entity, 0.0))
            .collect();
        let index: HashMap<Entity, usize> = caches
            .iter()
            .enumerate()
            .map(|(i, cache)| (cache.entity, i))
            .collect();

        let mut pairs = Vec::with_capacity(caches.len() * caches.len().saturating_sub(1) / 2);
        for first in 0..caches.len() {
            for second in first + 1..caches.len() {
                pairs.push(PotentialCollision::new(first, second));
            }
        }
        self.stats.pairs = pairs.len();

        let mut changed: HashSet<usize> = (0..caches.len()).collect();
        let mut reported_any = !caches.is_empty();
        let mut floor = 0.0_f32;
        let mut warned = false;

        // Any reported entity keeps the pass going, even one without a
        // snapshot; only snapshotted ones are refreshed and recomputed.
        while reported_any {
            self.stats.iterations += 1;
            if !warned && self.stats.iterations > self.config.warn_after_iterations {
                warned = true;
                log::warn!(
                    "CollisionSystem: pass still unresolved after {} iterations (floor {:.4}); \
                     check that collision callbacks stop reporting changes",
                    self.config.warn_after_iterations,
                    floor
                );
            }

            for pair in &mut pairs {
                if pair.time.is_unknown() || changed.iter().any(|&i| pair.involves(i)) {
                    if world.is_collider_enabled(caches[pair.first].entity)
                        && world.is_collider_enabled(caches[pair.second].entity)
                    {
                        pair.compute(&caches);
                    } else {
                        pair.time = CollisionTime::Never;
                        pair.delivered = false;
                    }
                    self.stats.recomputations += 1;
                }
            }

            let mut order: Vec<usize> = (0..pairs.len()).collect();
            order.sort_by(|&a, &b| pairs[a].time.sort_key().total_cmp(&pairs[b].time.sort_key()));

            let mut next_changed: HashSet<usize> = HashSet::new();
            let mut batch_time: Option<f32> = None;
            reported_any = false;

            for p in order {
                let Some(time) = pairs[p].time.at() else {
                    break;
                };
                if time < floor {
                    continue;
                }
                if batch_time.is_some_and(|batch| time != batch) {
                    break;
                }
                if pairs[p].delivered {
                    continue;
                }

                let Some(collision) = synthesize(world, &caches, &pairs[p], time, &next_changed) else {
                    continue;
                };
                pairs[p].delivered = true;

                let reported = self.deliver(world, &collision);
                if !reported.is_empty() {
                    reported_any = true;
                    if batch_time.is_none() {
                        batch_time = Some(time);
                        floor = time;
                    }
                }
                next_changed.extend(reported.iter().filter_map(|entity| index.get(entity).copied()));
            }

            for &i in &next_changed {
                caches[i].refresh(world, floor);
            }
            changed = next_changed;
        }

        log::debug!(
            "CollisionSystem: pass finished - {} iterations, {} pairs, {} recomputations, {} events",
            self.stats.iterations,
            self.stats.pairs,
            self.stats.recomputations,
            self.stats.events_resolved
        );
        Ok(())
    }

    /// Hand one event to both colliders' callbacks
    fn deliver(&mut self, world: &mut World, collision: &Collision) -> ChangedEntities {
        log::trace!(
            "CollisionSystem: {:?} <-> {:?} at t={:.4}, normal {:?}",
            collision.entity,
            collision.other,
            collision.time,
            collision.normal
        );
        self.stats.events_resolved += 1;
        if self.config.record_trace {
            self.trace.record(*collision);
        }

        let mut changed = invoke_callbacks(world, collision);
        changed.extend(invoke_callbacks(world, &collision.inverted()));
        changed
    }
}

/// Build the event payload for a pair, or `None` if it can no longer fire
///
/// Participants already changed by an earlier event of the same batch have
/// been re-anchored at `time`, so they are sampled at the start of their new
/// path rather than through their stale snapshot. The normal is still the one
/// computed from the old paths; it matches as long as the re-anchor happened
/// at the contact point.
fn synthesize(
    world: &World,
    caches: &[EntityCache],
    pair: &PotentialCollision,
    time: f32,
    restarted: &HashSet<usize>,
) -> Option<Collision> {
    let first = caches.get(pair.first)?;
    let second = caches.get(pair.second)?;
    if first.retired || second.retired {
        return None;
    }
    if !world.is_collider_enabled(first.entity) || !world.is_collider_enabled(second.entity) {
        return None;
    }

    let fraction = |index: usize, cache: &EntityCache| {
        if restarted.contains(&index) {
            0.0
        } else {
            cache.local_fraction(time)
        }
    };

    Some(Collision {
        entity: first.entity,
        other: second.entity,
        time,
        position: world.interpolated_global_position(first.entity, fraction(pair.first, first))?,
        other_position: world.interpolated_global_position(second.entity, fraction(pair.second, second))?,
        normal: pair.normal,
    })
}

/// Run every callback on `collision.entity`'s collider in registration order
fn invoke_callbacks(world: &mut World, collision: &Collision) -> ChangedEntities {
    let mut changed = ChangedEntities::new();
    let Some(collider) = world.collider_mut(collision.entity) else {
        return changed;
    };

    let mut callbacks = collider.take_callbacks();
    for callback in &mut callbacks {
        changed.extend(callback.on_collision(collision, world));
    }

    if let Some(collider) = world.collider_mut(collision.entity) {
        collider.restore_callbacks(callbacks);
    }
    changed
}
