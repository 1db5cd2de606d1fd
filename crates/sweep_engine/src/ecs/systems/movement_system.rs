//! Movement integration
//!
//! Turns velocities into the end-of-step poses the collision pass sweeps
//! toward. Run [`MovementSystem::begin_step`] before each collision pass.

use crate::ecs::World;

/// Predicts each moving entity's end-of-step pose from its velocity
#[derive(Debug, Default)]
pub struct MovementSystem {
    steps: u64,
}

impl MovementSystem {
    /// Create a new movement system
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps begun so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Commit last step's end pose and predict the next one
    ///
    /// For every entity with both a transform and an enabled movement
    /// component: the previous `next_*` pose becomes current, then
    /// `next_position = position + velocity * dt` and
    /// `next_angle = angle + angular_velocity * dt`. Entities without
    /// movement (or with it disabled) just commit.
    pub fn begin_step(&mut self, world: &mut World, delta_time: f32) {
        self.steps += 1;

        let entities: Vec<_> = world.entities().collect();
        for entity in entities {
            let movement = world
                .movement(entity)
                .filter(|movement| movement.enabled)
                .map(|movement| (movement.velocity, movement.angular_velocity));

            let Some(transform) = world.transform_mut(entity) else {
                continue;
            };
            transform.commit();

            match movement {
                Some((velocity, angular_velocity)) => {
                    transform.next_position = transform.position + velocity * delta_time;
                    transform.next_angle = transform.angle + angular_velocity * delta_time;
                }
                None => {
                    transform.next_position = transform.position;
                    transform.next_angle = transform.angle;
                }
            }
        }

        log::trace!("MovementSystem: began step {} (dt = {})", self.steps, delta_time);
    }
}
