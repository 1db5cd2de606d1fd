//! End-to-end collision pass scenarios
//!
//! Each test builds a small world, runs one pass and checks what the response
//! callbacks were told.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use approx::assert_relative_eq;
use sweep_engine::prelude::*;

type Log = Rc<RefCell<Vec<Collision>>>;

const EPS: f32 = 1.0e-4;

fn recorder(log: &Log) -> impl FnMut(&Collision, &mut World) -> ChangedEntities {
    let log = Rc::clone(log);
    move |collision, _world| {
        log.borrow_mut().push(*collision);
        ChangedEntities::new()
    }
}

/// Records the event, then parks the entity at its contact position
fn stopper(log: &Log) -> impl FnMut(&Collision, &mut World) -> ChangedEntities {
    let log = Rc::clone(log);
    move |collision, world| {
        log.borrow_mut().push(*collision);
        let mut changed = ChangedEntities::new();
        if let Some(transform) = world.transform_mut(collision.entity) {
            transform.redirect(collision.position, collision.position);
            changed.insert(collision.entity);
        }
        changed
    }
}

fn spawn_circle(world: &mut World, position: Vec2, next: Vec2, radius: f32, log: &Log) -> Entity {
    let entity = world.create_entity();
    world
        .insert_transform(entity, TransformComponent::moving(position, next))
        .unwrap();
    world
        .insert_collider(entity, ColliderComponent::circle(radius).on_collision(recorder(log)))
        .unwrap();
    entity
}

fn spawn_wall(world: &mut World, from: Vec2, to: Vec2) -> Entity {
    let entity = world.create_entity();
    world
        .insert_transform(entity, TransformComponent::from_position(from))
        .unwrap();
    world.insert_collider(entity, ColliderComponent::line(to - from)).unwrap();
    entity
}

fn run(world: &mut World) -> CollisionSystem {
    let mut system = CollisionSystem::new(CollisionConfig::new().with_trace(true));
    system.advance(world).unwrap();
    system
}

#[test]
fn test_head_on_reaches_stationary_circle_at_eight_tenths() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), 1.0, &log);
    let b = spawn_circle(&mut world, Vec2::new(0.0, 10.0), Vec2::new(0.0, 10.0), 1.0, &log);

    run(&mut world);

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    let seen_by_a = log.iter().find(|c| c.entity == a).unwrap();
    assert_eq!(seen_by_a.other, b);
    assert_relative_eq!(seen_by_a.time, 0.8, epsilon = EPS);
    assert_relative_eq!(seen_by_a.position, Vec2::new(0.0, 8.0), epsilon = EPS);
    assert_relative_eq!(seen_by_a.other_position, Vec2::new(0.0, 10.0), epsilon = EPS);
}

#[test]
fn test_equal_circles_meet_halfway_with_axis_normal() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 5.0, &log);
    spawn_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), 5.0, &log);

    run(&mut world);

    let log = log.borrow();
    let seen_by_a = log.iter().find(|c| c.entity == a).unwrap();
    assert_relative_eq!(seen_by_a.time, 0.5, epsilon = EPS);
    assert_relative_eq!(seen_by_a.normal, Vec2::new(1.0, 0.0), epsilon = EPS);
}

#[test]
fn test_both_sides_see_the_same_event() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(6.0, 6.0), 1.0, &log);
    let b = spawn_circle(&mut world, Vec2::new(6.0, 0.0), Vec2::new(0.0, 6.0), 1.5, &log);

    run(&mut world);

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    let seen_by_a = log.iter().find(|c| c.entity == a).unwrap();
    let seen_by_b = log.iter().find(|c| c.entity == b).unwrap();

    assert_relative_eq!(seen_by_a.time, seen_by_b.time);
    assert_relative_eq!(seen_by_a.position, seen_by_b.other_position);
    assert_relative_eq!(seen_by_a.other_position, seen_by_b.position);
    assert_relative_eq!(seen_by_a.normal, -seen_by_b.normal);
    assert_relative_eq!(seen_by_a.normal.norm(), 1.0, epsilon = EPS);
}

#[test]
fn test_reported_times_stay_within_the_step() {
    let mut world = World::new();
    let log = Log::default();
    spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(30.0, 0.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(10.0, -10.0), Vec2::new(10.0, 10.0), 2.0, &log);
    spawn_circle(&mut world, Vec2::new(20.0, 1.0), Vec2::new(20.0, 1.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(0.5, 0.5), Vec2::new(-3.0, 0.5), 1.0, &log);
    spawn_wall(&mut world, Vec2::new(25.0, -5.0), Vec2::new(25.0, 5.0));

    let system = run(&mut world);

    assert!(!system.trace().is_empty());
    for event in system.trace().events() {
        assert!((0.0..=1.0).contains(&event.time), "time {} outside the step", event.time);
    }
    assert!(log.borrow().iter().all(|c| (0.0..=1.0).contains(&c.time)));
}

#[test]
fn test_overlapping_circles_collide_immediately() {
    let mut world = World::new();
    let log = Log::default();
    // Moving apart, but already overlapping
    spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(-10.0, 0.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(1.5, 0.0), Vec2::new(1.5, 0.0), 1.0, &log);

    run(&mut world);

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|c| c.time == 0.0));
}

#[test]
fn test_separating_or_slow_circles_never_collide() {
    let mut world = World::new();
    let log = Log::default();
    // Moving apart
    spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(-5.0, 0.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(3.0, 0.0), Vec2::new(3.0, 0.0), 1.0, &log);
    // Too slow to close a gap of 1
    spawn_circle(&mut world, Vec2::new(0.0, 50.0), Vec2::new(0.5, 50.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(3.0, 50.0), Vec2::new(3.0, 50.0), 1.0, &log);

    let system = run(&mut world);

    assert!(log.borrow().is_empty());
    assert!(system.trace().is_empty());
}

#[test]
fn test_near_miss_reports_nothing() {
    let mut world = World::new();
    let log = Log::default();
    spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(5.0, 2.1), Vec2::new(5.0, 2.1), 1.0, &log);

    run(&mut world);

    assert!(log.borrow().is_empty());
}

#[test]
fn test_discrete_movement_is_not_swept() {
    let mut world = World::new();
    let log = Log::default();

    let jumper = world.create_entity();
    world
        .insert_transform(
            jumper,
            TransformComponent::moving(Vec2::new(0.0, 0.0), Vec2::new(0.0, 20.0)).as_discrete(),
        )
        .unwrap();
    world
        .insert_collider(jumper, ColliderComponent::circle(1.0).on_collision(recorder(&log)))
        .unwrap();
    spawn_circle(&mut world, Vec2::new(0.0, 10.0), Vec2::new(0.0, 10.0), 1.0, &log);

    run(&mut world);
    assert!(log.borrow().is_empty());

    // Landing on top of the obstacle is still an overlap
    world.transform_mut(jumper).unwrap().next_position = Vec2::new(0.0, 10.5);
    run(&mut world);

    let log = log.borrow();
    let seen = log.iter().find(|c| c.entity == jumper).unwrap();
    assert_relative_eq!(seen.time, 0.0);
    assert_relative_eq!(seen.position, Vec2::new(0.0, 10.5), epsilon = EPS);
}

#[test]
fn test_every_contact_of_a_multi_way_sweep_is_found() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), 1.0, &log);

    // A pickup that vanishes when touched
    let pickup = world.create_entity();
    world
        .insert_transform(pickup, TransformComponent::from_position(Vec2::new(5.0, 0.0)))
        .unwrap();
    world
        .insert_collider(
            pickup,
            ColliderComponent::circle(1.0).on_collision(|collision, world| {
                world.set_collider_enabled(collision.entity, false);
                ChangedEntities::from([collision.entity])
            }),
        )
        .unwrap();
    let c = spawn_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), 1.0, &log);

    let system = run(&mut world);

    let log = log.borrow();
    let seen_by_a: Vec<_> = log.iter().filter(|event| event.entity == a).collect();
    assert_eq!(seen_by_a.len(), 2);
    assert_eq!(seen_by_a[0].other, pickup);
    assert_relative_eq!(seen_by_a[0].time, 0.15, epsilon = EPS);
    assert_eq!(seen_by_a[1].other, c);
    assert_relative_eq!(seen_by_a[1].time, 0.65, epsilon = EPS);
    assert_eq!(system.last_stats().iterations, 2);
}

#[test]
fn test_disabling_on_hit_stops_further_events() {
    let mut world = World::new();
    let log = Log::default();

    let a = world.create_entity();
    world
        .insert_transform(a, TransformComponent::moving(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0)))
        .unwrap();
    world
        .insert_collider(
            a,
            ColliderComponent::circle(1.0).on_collision(|collision, world| {
                world.set_collider_enabled(collision.entity, false);
                ChangedEntities::from([collision.entity])
            }),
        )
        .unwrap();
    let b = spawn_circle(&mut world, Vec2::new(5.0, 0.0), Vec2::new(5.0, 0.0), 1.0, &log);
    spawn_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), 1.0, &log);

    let system = run(&mut world);

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].entity, b);
    assert_eq!(log[0].other, a);
    assert_eq!(system.trace().involving(a).len(), 1);
    assert!(!world.is_collider_enabled(a));
}

#[test]
fn test_callbacks_run_in_registration_order() {
    let mut world = World::new();
    let order: Rc<RefCell<Vec<&'static str>>> = Rc::default();

    let push = |name: &'static str| {
        let order = Rc::clone(&order);
        move |_: &Collision, _: &mut World| {
            order.borrow_mut().push(name);
            ChangedEntities::new()
        }
    };

    let a = world.create_entity();
    world
        .insert_transform(a, TransformComponent::moving(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)))
        .unwrap();
    world
        .insert_collider(
            a,
            ColliderComponent::circle(1.0)
                .on_collision(push("a1"))
                .on_collision(push("a2")),
        )
        .unwrap();

    let b = world.create_entity();
    world
        .insert_transform(b, TransformComponent::from_position(Vec2::new(6.0, 0.0)))
        .unwrap();
    world
        .insert_collider(b, ColliderComponent::circle(1.0).on_collision(push("b1")))
        .unwrap();

    run(&mut world);

    assert_eq!(*order.borrow(), vec!["a1", "a2", "b1"]);
    assert_eq!(world.collider(a).unwrap().callback_count(), 2);
}

#[test]
fn test_despawned_entity_drops_out_of_the_pass() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), 1.0, &log);

    let target = world.create_entity();
    world
        .insert_transform(target, TransformComponent::from_position(Vec2::new(5.0, 0.0)))
        .unwrap();
    world
        .insert_collider(
            target,
            ColliderComponent::circle(1.0).on_collision(|collision, world| {
                world.despawn(collision.entity);
                ChangedEntities::from([collision.entity])
            }),
        )
        .unwrap();

    let c = spawn_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), 1.0, &log);
    // Would reach the target's spot late in the step
    let d = spawn_circle(&mut world, Vec2::new(5.0, 10.0), Vec2::new(5.0, 0.0), 1.0, &log);

    run(&mut world);

    assert!(!world.contains(target));
    let log = log.borrow();
    let others_of_a: Vec<_> = log.iter().filter(|e| e.entity == a).map(|e| e.other).collect();
    assert_eq!(others_of_a, vec![target, c]);
    assert!(log.iter().all(|e| e.entity != d));
}

#[test]
fn test_circle_meets_line_wall() {
    let mut world = World::new();
    let log = Log::default();
    let ball = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 1.0, &log);
    let wall = spawn_wall(&mut world, Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0));

    let system = run(&mut world);

    let seen = system.trace().first_between(ball, wall).unwrap();
    assert_relative_eq!(seen.time, 0.4, epsilon = EPS);
    assert_relative_eq!(seen.normal, Vec2::new(1.0, 0.0), epsilon = EPS);
    assert_relative_eq!(seen.position, Vec2::new(4.0, 0.0), epsilon = EPS);

    let seen_by_wall = system.trace().first_between(wall, ball).unwrap();
    assert_relative_eq!(seen_by_wall.normal, Vec2::new(-1.0, 0.0), epsilon = EPS);
}

/// Reflect off `wall`, stop at anything else; ignore repeats against the same other
fn bouncer(wall: Entity) -> impl FnMut(&Collision, &mut World) -> ChangedEntities {
    let mut seen = HashSet::new();
    move |collision, world| {
        let mut changed = ChangedEntities::new();
        if !seen.insert(collision.other) {
            return changed;
        }
        let Some(transform) = world.transform_mut(collision.entity) else {
            return changed;
        };

        let remaining = transform.next_position - collision.position;
        let redirected = if collision.other == wall {
            remaining - collision.normal * (2.0 * remaining.dot(&collision.normal))
        } else {
            Vec2::zeros()
        };
        transform.redirect(collision.position, collision.position + redirected);
        changed.insert(collision.entity);
        changed
    }
}

#[test]
fn test_bounce_is_reswept_for_the_rest_of_the_step() {
    let mut world = World::new();

    let ball = world.create_entity();
    let wall = spawn_wall(&mut world, Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0));
    let target = world.create_entity();

    world
        .insert_transform(ball, TransformComponent::moving(Vec2::new(2.0, 0.0), Vec2::new(12.0, 0.0)))
        .unwrap();
    world
        .insert_collider(ball, ColliderComponent::circle(1.0).on_collision(bouncer(wall)))
        .unwrap();
    world
        .insert_transform(target, TransformComponent::from_position(Vec2::new(-2.0, 0.0)))
        .unwrap();
    world.insert_collider(target, ColliderComponent::circle(1.0)).unwrap();

    let system = run(&mut world);

    let hit_wall = system.trace().first_between(ball, wall).unwrap();
    assert_relative_eq!(hit_wall.time, 0.2, epsilon = EPS);
    assert_relative_eq!(hit_wall.position, Vec2::new(4.0, 0.0), epsilon = EPS);

    // Back from x = 4 toward x = -4 over [0.2, 1]; touches the target at x = 0
    let hit_target = system.trace().first_between(ball, target).unwrap();
    assert_relative_eq!(hit_target.time, 0.6, epsilon = EPS);
    assert_relative_eq!(hit_target.position, Vec2::new(0.0, 0.0), epsilon = EPS);
    assert_relative_eq!(hit_target.other_position, Vec2::new(-2.0, 0.0), epsilon = EPS);

    let transform = world.transform(ball).unwrap();
    assert_relative_eq!(transform.next_position, Vec2::new(0.0, 0.0), epsilon = EPS);
}

#[test]
fn test_movement_system_feeds_the_pass() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 1.0, &log);
    world
        .insert_movement(a, MovementComponent::with_velocity(Vec2::new(10.0, 0.0)))
        .unwrap();
    spawn_circle(&mut world, Vec2::new(8.0, 0.0), Vec2::new(8.0, 0.0), 1.0, &log);

    let mut movement = MovementSystem::new();
    let mut collisions = CollisionSystem::default();

    movement.begin_step(&mut world, 0.5);
    collisions.advance(&mut world).unwrap();
    assert!(log.borrow().is_empty());

    movement.begin_step(&mut world, 0.5);
    collisions.advance(&mut world).unwrap();

    // From x = 5 toward x = 10; contact at x = 6
    let log = log.borrow();
    let seen = log.iter().find(|c| c.entity == a).unwrap();
    assert_relative_eq!(seen.time, 0.2, epsilon = EPS);
    assert_eq!(collisions.last_stats().events_resolved, 1);
}

#[test]
fn test_change_to_entity_without_collider_keeps_the_pass_going() {
    let mut world = World::new();
    let log = Log::default();
    let a = spawn_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), 1.0, &log);

    // Touching b only bumps a score entity, which has no collider
    let score = world.create_entity();
    let b = world.create_entity();
    world
        .insert_transform(b, TransformComponent::from_position(Vec2::new(5.0, 3.0)))
        .unwrap();
    world
        .insert_collider(
            b,
            ColliderComponent::circle(3.5).on_collision(move |_, _| ChangedEntities::from([score])),
        )
        .unwrap();
    let c = spawn_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), 1.0, &log);

    let system = run(&mut world);

    let log = log.borrow();
    let seen_by_a: Vec<_> = log.iter().filter(|event| event.entity == a).collect();
    assert_eq!(seen_by_a.len(), 2);
    assert_eq!(seen_by_a[0].other, b);
    // |(x - 5, -3)| = 4.5 at x = 5 - sqrt(11.25)
    assert_relative_eq!(seen_by_a[0].time, (5.0 - 11.25_f32.sqrt()) / 20.0, epsilon = EPS);
    assert_eq!(seen_by_a[1].other, c);
    assert_relative_eq!(seen_by_a[1].time, 0.65, epsilon = EPS);
    assert_eq!(system.last_stats().iterations, 2);
}

#[test]
fn test_same_time_events_resolve_in_one_iteration() {
    let mut world = World::new();
    let log = Log::default();

    // Two unrelated movers, each reaching its target halfway through the step
    let mut movers = Vec::new();
    for y in [0.0, 50.0] {
        let mover = world.create_entity();
        world
            .insert_transform(mover, TransformComponent::moving(Vec2::new(0.0, y), Vec2::new(4.0, y)))
            .unwrap();
        world
            .insert_collider(mover, ColliderComponent::circle(1.0).on_collision(stopper(&log)))
            .unwrap();
        spawn_circle(&mut world, Vec2::new(4.0, y), Vec2::new(4.0, y), 1.0, &log);
        movers.push(mover);
    }

    let system = run(&mut world);

    let log = log.borrow();
    for (mover, y) in movers.iter().zip([0.0, 50.0]) {
        let seen = log.iter().find(|event| event.entity == *mover).unwrap();
        assert_relative_eq!(seen.time, 0.5, epsilon = EPS);
        assert_relative_eq!(seen.position, Vec2::new(2.0, y), epsilon = EPS);
        let transform = world.transform(*mover).unwrap();
        assert_relative_eq!(transform.next_position, Vec2::new(2.0, y), epsilon = EPS);
    }
    // Both events in the first iteration, a quiet second one confirms the stops
    let stats = system.last_stats();
    assert_eq!(stats.events_resolved, 2);
    assert_eq!(stats.iterations, 2);
}
