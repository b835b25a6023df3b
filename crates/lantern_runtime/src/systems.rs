//! Built-in simulation systems.
//!
//! Three systems every LANTERN world runs: input-to-intent for the player
//! entity, movement integration with per-axis solid resolution, and the
//! per-tick proximity rebuild. Game code layers its own systems around
//! these using the same registration call.

use std::rc::Rc;

use lantern_core::{BodyKind, ComponentKind, Position, Velocity, World};

use crate::collab::CollisionQuery;
use crate::config::RuntimeConfig;
use crate::schedule::{Phase, Scheduler, SystemCtx};

/// Order key of the player-input system within [`Phase::Input`].
pub const PLAYER_INPUT_ORDER: i32 = 0;
/// Order key of the integrator within [`Phase::Physics`].
pub const INTEGRATE_ORDER: i32 = 100;
/// Order key of the proximity rebuild within [`Phase::SimPost`].
pub const PROXIMITY_ORDER: i32 = 100;

/// Registers the built-in systems into their canonical phases and orders.
pub fn register_builtin_systems(
    scheduler: &mut Scheduler,
    config: &RuntimeConfig,
    collision: Rc<dyn CollisionQuery>,
) {
    let player_speed = config.player_speed;
    scheduler.add_system(
        Phase::Input,
        PLAYER_INPUT_ORDER,
        "player_input",
        Box::new(move |world: &mut World, ctx: &SystemCtx<'_>| {
            player_input(world, ctx, player_speed);
        }),
    );

    scheduler.add_system(
        Phase::Physics,
        INTEGRATE_ORDER,
        "integrate",
        Box::new(move |world: &mut World, ctx: &SystemCtx<'_>| {
            integrate(world, ctx.dt, collision.as_ref());
        }),
    );

    scheduler.add_system(
        Phase::SimPost,
        PROXIMITY_ORDER,
        "proximity_view",
        Box::new(|world: &mut World, _: &SystemCtx<'_>| world.rebuild_proximity()),
    );
}

/// Turns the frame's held-direction state into the player's velocity.
///
/// Diagonal intent is normalized so the player never outruns
/// `player_speed`. With no input snapshot (frame phases) or no player
/// entity, does nothing.
fn player_input(world: &mut World, ctx: &SystemCtx<'_>, player_speed: f32) {
    let Some(input) = ctx.input else {
        return;
    };
    let player =
        world.find_first(ComponentKind::Player.bit() | ComponentKind::Velocity.bit());
    if player.is_null() {
        return;
    }

    let (mut mx, mut my) = (input.move_x(), input.move_y());
    let len = (mx * mx + my * my).sqrt();
    if len > 1.0 {
        mx /= len;
        my /= len;
    }
    world.add_velocity(player, mx * player_speed, my * player_speed);
}

/// Integrates velocities into positions, one axis at a time.
///
/// Dynamic bodies with a collider hand each axis displacement to the
/// solid query and take the corrected position back, so a fast mover
/// lands flush against a wall and sliding along it falls out of axis
/// separation. Static bodies never move; kinematic bodies and bodiless
/// movers integrate unresolved.
fn integrate(world: &mut World, dt: f32, query: &dyn CollisionQuery) {
    // Entities assembled before the physics hook was installed still get
    // their body materialized here.
    world.materialize_bodies();

    let move_mask = ComponentKind::Position.bit() | ComponentKind::Velocity.bit();
    for idx in 0..world.capacity() {
        let mask = world.mask_at(idx);
        if mask & move_mask != move_mask {
            continue;
        }

        let body = (mask & ComponentKind::Body.bit() != 0)
            .then(|| world.components.bodies.as_slice()[idx]);
        if body.is_some_and(|b| b.body_kind() == BodyKind::Static) {
            continue;
        }
        let resolver = if body.is_some_and(|b| b.body_kind() == BodyKind::Dynamic)
            && mask & ComponentKind::Collider.bit() != 0
        {
            Some(world.components.colliders.as_slice()[idx])
        } else {
            None
        };

        let vel: Velocity = world.components.velocities.as_slice()[idx];
        let mut pos: Position = world.components.positions.as_slice()[idx];

        pos.x += vel.x * dt;
        if let Some(collider) = resolver {
            pos = query.resolve_overlap(pos, collider);
        }
        pos.y += vel.y * dt;
        if let Some(collider) = resolver {
            pos = query.resolve_overlap(pos, collider);
        }

        world.components.positions.set(idx, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::NoCollision;
    use crate::input::{Button, InputSnapshot};
    use lantern_core::{Body, Collider};

    fn setup() -> (Scheduler, World) {
        let mut scheduler = Scheduler::new();
        let config = RuntimeConfig::default();
        register_builtin_systems(&mut scheduler, &config, Rc::new(NoCollision));
        (scheduler, World::new(32))
    }

    #[test]
    fn test_player_input_drives_velocity() {
        let (mut scheduler, mut world) = setup();
        let player = world.create();
        world.add_position(player, 0.0, 0.0);
        world.add_velocity(player, 0.0, 0.0);
        world.add_player(player);

        let mut input = InputSnapshot::default();
        input.press(Button::Right);
        scheduler.tick(&mut world, 1.0 / 60.0, &input);

        let vel = world.get::<Velocity>(player).unwrap();
        assert!((vel.x - 120.0).abs() < 1e-4);
        assert!(vel.y.abs() < 1e-4);

        // Integration in the same tick moved the player by one step.
        let pos = world.get::<Position>(player).unwrap();
        assert!((pos.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let (mut scheduler, mut world) = setup();
        let player = world.create();
        world.add_velocity(player, 0.0, 0.0);
        world.add_player(player);

        let mut input = InputSnapshot::default();
        input.press(Button::Right);
        input.press(Button::Down);
        scheduler.tick(&mut world, 1.0 / 60.0, &input);

        let vel = world.get::<Velocity>(player).unwrap();
        let speed = (vel.x * vel.x + vel.y * vel.y).sqrt();
        assert!((speed - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_static_bodies_never_move() {
        let (mut scheduler, mut world) = setup();
        let wall = world.create();
        world.add_position(wall, 5.0, 5.0);
        world.add_velocity(wall, 100.0, 0.0);
        world.add_collider(wall, 1.0, 1.0);
        world.add_body(wall, Body::new(lantern_core::BodyKind::Static, 0.0));

        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        let pos = world.get::<Position>(wall).unwrap();
        assert!((pos.x - 5.0).abs() < f32::EPSILON);
    }

    struct WallAt {
        min_x: f32,
    }

    impl CollisionQuery for WallAt {
        fn resolve_overlap(&self, pos: Position, collider: Collider) -> Position {
            if pos.x + collider.hx > self.min_x {
                Position::new(self.min_x - collider.hx, pos.y)
            } else {
                pos
            }
        }

        fn is_walkable(&self, pos: Position, collider: Collider) -> bool {
            pos.x + collider.hx <= self.min_x
        }
    }

    #[test]
    fn test_per_axis_resolution_slides_along_wall() {
        let mut scheduler = Scheduler::new();
        let config = RuntimeConfig::default();
        register_builtin_systems(&mut scheduler, &config, Rc::new(WallAt { min_x: 2.0 }));

        let mut world = World::new(8);
        let mover = world.create();
        world.add_position(mover, 0.0, 0.0);
        world.add_velocity(mover, 600.0, 600.0);
        world.add_collider(mover, 0.5, 0.5);
        world.add_body(mover, Body::new(lantern_core::BodyKind::Dynamic, 1.0));

        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        let pos = world.get::<Position>(mover).unwrap();
        // X corrected flush against the wall, Y free.
        assert!((pos.x - 1.5).abs() < 1e-4);
        assert!((pos.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_fast_mover_lands_flush_not_short() {
        let mut scheduler = Scheduler::new();
        let config = RuntimeConfig::default();
        register_builtin_systems(&mut scheduler, &config, Rc::new(WallAt { min_x: 2.0 }));

        let mut world = World::new(8);
        let mover = world.create();
        // One step covers 20 units; the wall face is 1.5 units away.
        world.add_position(mover, 0.0, 0.0);
        world.add_velocity(mover, 1200.0, 0.0);
        world.add_collider(mover, 0.5, 0.5);
        world.add_body(mover, Body::new(lantern_core::BodyKind::Dynamic, 1.0));

        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        let pos = world.get::<Position>(mover).unwrap();
        // Resolved to the contact point, not left at the pre-step position.
        assert!((pos.x - 1.5).abs() < 1e-4);

        // Parked against the wall, further pushes keep it flush.
        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        let pos = world.get::<Position>(mover).unwrap();
        assert!((pos.x - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_walkability_probe() {
        let wall = WallAt { min_x: 2.0 };
        let half = Collider::new(0.5, 0.5);
        assert!(wall.is_walkable(Position::new(0.0, 0.0), half));
        assert!(!wall.is_walkable(Position::new(2.0, 0.0), half));
        assert!(NoCollision.is_walkable(Position::new(2.0, 0.0), half));
    }

    #[test]
    fn test_kinematic_bodies_ignore_solids() {
        let mut scheduler = Scheduler::new();
        let config = RuntimeConfig::default();
        register_builtin_systems(&mut scheduler, &config, Rc::new(WallAt { min_x: 2.0 }));

        let mut world = World::new(8);
        let ghost = world.create();
        world.add_position(ghost, 0.0, 0.0);
        world.add_velocity(ghost, 600.0, 0.0);
        world.add_collider(ghost, 0.5, 0.5);
        world.add_body(ghost, Body::new(lantern_core::BodyKind::Kinematic, 1.0));

        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        let pos = world.get::<Position>(ghost).unwrap();
        assert!((pos.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_proximity_rebuilt_each_tick() {
        let (mut scheduler, mut world) = setup();

        let zone = world.create();
        world.add_position(zone, 0.0, 0.0);
        world.add_collider(zone, 1.0, 1.0);
        world.add_trigger(zone, 0.0, ComponentKind::Player.bit());

        let player = world.create();
        world.add_position(player, 100.0, 0.0);
        world.add_velocity(player, 0.0, 0.0);
        world.add_collider(player, 0.5, 0.5);
        world.add_player(player);

        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        assert_eq!(world.prox_stay().count(), 0);

        world.add_position(player, 0.0, 0.0);
        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        assert_eq!(world.prox_enter().count(), 1);
    }
}
