//! Headless demo: a scripted player walks right through a trigger zone
//! and back out, logging enter/stay/exit transitions along the way.
//!
//! Run with `RUST_LOG=debug` for per-frame detail. An optional first
//! argument names a TOML config file.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lantern_core::{ComponentKind, Position, Rect, TexHandle, World};
use lantern_runtime::{
    attach_sprite, register_builtin_systems, register_sprite_hooks, Button, Engine, EngineError,
    InputSnapshot, NoCollision, Phase, Platform, RuntimeConfig, SharedTextureStore, SystemCtx,
    TextureStore,
};

/// Reference-counting texture store with no real backing textures.
#[derive(Default)]
struct DemoTextures {
    refs: HashMap<TexHandle, u32>,
}

impl TextureStore for DemoTextures {
    fn acquire(&mut self, _path: &str) -> TexHandle {
        let tex = TexHandle {
            id: self.refs.len() as u32 + 1,
            generation: 1,
        };
        self.retain(tex);
        tex
    }

    fn retain(&mut self, tex: TexHandle) {
        *self.refs.entry(tex).or_insert(0) += 1;
    }

    fn release(&mut self, tex: TexHandle) {
        if let Some(count) = self.refs.get_mut(&tex) {
            *count = count.saturating_sub(1);
        }
    }

    fn is_valid(&self, tex: TexHandle) -> bool {
        self.refs.get(&tex).is_some_and(|&n| n > 0)
    }
}

/// Synthetic platform: a fixed 60 Hz clock and a scripted walk.
struct DemoPlatform {
    frame: u32,
    clock: f64,
    input: InputSnapshot,
}

impl DemoPlatform {
    const TOTAL_FRAMES: u32 = 360;

    fn new() -> Self {
        Self {
            frame: 0,
            clock: 0.0,
            input: InputSnapshot::default(),
        }
    }
}

impl Platform for DemoPlatform {
    fn now(&mut self) -> f64 {
        self.clock += 1.0 / 60.0;
        self.clock
    }

    fn pump_input(&mut self) -> InputSnapshot {
        self.input = self.input.next_frame();
        // Walk one second into the zone, one second back out, then idle.
        match self.frame {
            0 => self.input.press(Button::Right),
            60 => {
                self.input.release(Button::Right);
                self.input.press(Button::Left);
            }
            120 => self.input.release(Button::Left),
            _ => {}
        }
        self.frame += 1;
        self.input
    }

    fn should_close(&self) -> bool {
        self.frame >= Self::TOTAL_FRAMES
    }
}

fn spawn_scene(world: &mut World, store: &SharedTextureStore) {
    let tex = store.borrow_mut().acquire("sprites/player.png");

    let player = world.create();
    world.add_position(player, 0.0, 0.0);
    world.add_velocity(player, 0.0, 0.0);
    world.add_collider(player, 8.0, 8.0);
    world.add_player(player);
    attach_sprite(
        world,
        store,
        player,
        tex,
        Rect::new(0.0, 0.0, 16.0, 16.0),
        (8.0, 8.0),
    );
    // The entity now holds its own reference; drop the load reference.
    store.borrow_mut().release(tex);

    // A zone a short walk to the right of the spawn point.
    let zone = world.create();
    world.add_position(zone, 120.0, 0.0);
    world.add_collider(zone, 16.0, 16.0);
    world.add_trigger(zone, 4.0, ComponentKind::Player.bit());
}

/// Logs proximity transitions after the rebuild has run.
fn zone_events(world: &mut World, _: &SystemCtx<'_>) {
    for pair in world.prox_enter() {
        let pos = world.get::<Position>(pair.matched);
        tracing::info!(zone = ?pair.trigger_owner, entity = ?pair.matched, ?pos, "zone entered");
    }
    for pair in world.prox_exit() {
        tracing::info!(zone = ?pair.trigger_owner, entity = ?pair.matched, "zone left");
    }
}

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    let store: SharedTextureStore = Rc::new(RefCell::new(DemoTextures::default()));
    let mut engine = Engine::new(&config, |world, scheduler| {
        register_sprite_hooks(world, &store);
        register_builtin_systems(scheduler, &config, Rc::new(NoCollision));
        scheduler.add_system(Phase::SimPost, 200, "zone_events", Box::new(zone_events));
        spawn_scene(world, &store);
        Ok(())
    })?;

    engine.run(&mut DemoPlatform::new());
    tracing::info!(alive = engine.world().alive_count(), "demo finished");
    Ok(())
}
