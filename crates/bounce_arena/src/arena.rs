//! Balls bouncing inside four line-segment walls
//!
//! Balls move at constant speed and collide elastically with each other
//! (mass grows with the square of the radius) and with the walls. Every
//! response re-anchors the ball at the contact point and sends it along its
//! new velocity for the rest of the step, so a ball can bounce several times
//! per step without leaving the arena.

use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sweep_engine::prelude::*;

use crate::config::ArenaConfig;

const PLACEMENT_ATTEMPTS: u32 = 100;

/// Running totals across all steps
#[derive(Debug, Default)]
pub struct ArenaCounters {
    /// Collisions that changed a ball's velocity
    pub bounces: Cell<u64>,
}

/// The simulated arena
pub struct Arena {
    world: World,
    movement: MovementSystem,
    collisions: CollisionSystem,
    balls: Vec<Entity>,
    width: f32,
    height: f32,
    timestep: f32,
    counters: Rc<ArenaCounters>,
}

impl Arena {
    /// Build the walls and spawn the configured balls
    pub fn new(config: &ArenaConfig) -> Result<Self, WorldError> {
        let mut arena = Self {
            world: World::new(),
            movement: MovementSystem::new(),
            collisions: CollisionSystem::new(config.app.collision.clone()),
            balls: Vec::new(),
            width: config.arena.width,
            height: config.arena.height,
            timestep: config.app.engine.fixed_timestep,
            counters: Rc::default(),
        };

        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(arena.width, 0.0),
            Vec2::new(arena.width, arena.height),
            Vec2::new(0.0, arena.height),
        ];
        for (i, &from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            arena.add_wall(from, to)?;
        }

        let balls = &config.balls;
        let mut rng = StdRng::seed_from_u64(balls.seed);
        let mut placed: Vec<(Vec2, f32)> = Vec::new();

        for _ in 0..balls.count {
            let radius = rng.gen_range(balls.min_radius..=balls.max_radius);
            let Some(position) = (0..PLACEMENT_ATTEMPTS)
                .map(|_| {
                    Vec2::new(
                        rng.gen_range(radius..=arena.width - radius),
                        rng.gen_range(radius..=arena.height - radius),
                    )
                })
                .find(|candidate| {
                    placed
                        .iter()
                        .all(|(other, other_radius)| (candidate - other).norm() > radius + other_radius)
                })
            else {
                log::warn!("Arena: no room for another ball of radius {:.2}, spawned {}", radius, placed.len());
                break;
            };

            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(0.0..=balls.max_speed);
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

            arena.add_ball(position, radius, velocity)?;
            placed.push((position, radius));
        }

        log::info!(
            "Arena: {} x {} with {} balls, timestep {}",
            arena.width,
            arena.height,
            arena.balls.len(),
            arena.timestep
        );
        Ok(arena)
    }

    /// Add a static wall segment
    pub fn add_wall(&mut self, from: Vec2, to: Vec2) -> Result<Entity, WorldError> {
        let wall = self.world.create_entity();
        self.world.insert_transform(wall, TransformComponent::from_position(from))?;
        self.world.insert_collider(wall, ColliderComponent::line(to - from))?;
        Ok(wall)
    }

    /// Add a moving ball
    pub fn add_ball(&mut self, position: Vec2, radius: f32, velocity: Vec2) -> Result<Entity, WorldError> {
        let ball = self.world.create_entity();
        self.world.insert_transform(ball, TransformComponent::from_position(position))?;
        self.world.insert_movement(ball, MovementComponent::with_velocity(velocity))?;
        self.world.insert_collider(
            ball,
            ColliderComponent::circle(radius).on_collision(bounce(self.timestep, Rc::clone(&self.counters))),
        )?;
        self.balls.push(ball);
        Ok(ball)
    }

    /// Advance the simulation by one fixed step
    pub fn step(&mut self) -> Result<PassStats, CollisionError> {
        self.movement.begin_step(&mut self.world, self.timestep);
        self.collisions.advance(&mut self.world)?;
        Ok(self.collisions.last_stats())
    }

    /// Balls whose end-of-step position lies outside the walls
    pub fn escaped(&self) -> Vec<Entity> {
        const TOLERANCE: f32 = 1.0e-3;
        self.balls
            .iter()
            .copied()
            .filter(|&ball| {
                self.world.transform(ball).is_some_and(|transform| {
                    let p = transform.next_position;
                    p.x < -TOLERANCE
                        || p.y < -TOLERANCE
                        || p.x > self.width + TOLERANCE
                        || p.y > self.height + TOLERANCE
                })
            })
            .collect()
    }

    /// Sum of ball kinetic energies (unit density, mass = radius squared)
    pub fn kinetic_energy(&self) -> f32 {
        self.balls
            .iter()
            .filter_map(|&ball| {
                let speed = self.world.movement(ball)?.speed();
                let radius = self.world.collider(ball)?.shape.bounding_radius();
                Some(0.5 * radius * radius * speed * speed)
            })
            .sum()
    }

    /// Total bounces so far
    pub fn bounces(&self) -> u64 {
        self.counters.bounces.get()
    }

    /// The balls, in spawn order
    pub fn balls(&self) -> &[Entity] {
        &self.balls
    }

    /// The simulated world
    pub fn world(&self) -> &World {
        &self.world
    }
}

/// Response for one ball: reflect off walls, exchange momentum with balls
///
/// Ignores contacts the ball is already moving away from, which also makes
/// the response idempotent when the same contact is reported again.
fn bounce(timestep: f32, counters: Rc<ArenaCounters>) -> impl FnMut(&Collision, &mut World) -> ChangedEntities {
    move |collision, world| {
        let mut changed = ChangedEntities::new();
        let Some(velocity) = world.movement(collision.entity).map(|m| m.velocity) else {
            return changed;
        };
        let other_velocity = world.movement(collision.other).map(|m| m.velocity);
        let other_mass = other_velocity.and_then(|_| mass(world, collision.other));

        let relative = velocity - other_velocity.unwrap_or_else(Vec2::zeros);
        let approach = relative.dot(&collision.normal);
        if approach <= 0.0 {
            return changed;
        }

        let remaining = collision.remaining() * timestep;
        match (other_velocity, other_mass, mass(world, collision.entity)) {
            (Some(other_velocity), Some(other_mass), Some(own_mass)) => {
                // Elastic exchange along the normal, weighted by mass
                let total = own_mass + other_mass;
                let own = velocity - collision.normal * (2.0 * other_mass / total * approach);
                let other = other_velocity + collision.normal * (2.0 * own_mass / total * approach);
                relaunch(world, collision.entity, collision.position, own, remaining, &mut changed);
                relaunch(world, collision.other, collision.other_position, other, remaining, &mut changed);
            }
            _ => {
                let reflected = velocity - collision.normal * (2.0 * approach);
                relaunch(world, collision.entity, collision.position, reflected, remaining, &mut changed);
            }
        }

        counters.bounces.set(counters.bounces.get() + 1);
        log::debug!(
            "Arena: {:?} bounced off {:?} at t={:.3}",
            collision.entity,
            collision.other,
            collision.time
        );
        changed
    }
}

fn mass(world: &World, entity: Entity) -> Option<f32> {
    let radius = world.collider(entity)?.shape.bounding_radius();
    Some(radius * radius)
}

/// Put `entity` at its contact position and send it off with `velocity`
/// for the `remaining` seconds of the step
fn relaunch(
    world: &mut World,
    entity: Entity,
    contact: Vec2,
    velocity: Vec2,
    remaining: f32,
    changed: &mut ChangedEntities,
) {
    let Some(origin) = world.collider_origin(entity, contact) else {
        return;
    };
    if let Some(movement) = world.movement_mut(entity) {
        movement.set_velocity(velocity);
    }
    if let Some(transform) = world.transform_mut(entity) {
        transform.redirect(origin, origin + velocity * remaining);
        changed.insert(entity);
    }
}
