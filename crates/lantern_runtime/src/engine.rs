//! Engine bootstrap and the outer frame loop.
//!
//! Owns the world, the scheduler and the timestep; the platform
//! collaborator supplies time and input and decides when to stop. The
//! loop body is also exposed piecewise (`frame`) so headless tests can
//! drive synthetic clocks without a platform.

use lantern_core::World;
use tracing::{debug, info};

use crate::collab::Platform;
use crate::config::RuntimeConfig;
use crate::error::EngineError;
use crate::input::InputSnapshot;
use crate::schedule::Scheduler;
use crate::step::{FixedTimestep, FramePlan};

/// The assembled runtime: world, scheduler and frame pacing.
pub struct Engine {
    world: World,
    scheduler: Scheduler,
    timestep: FixedTimestep,
    last_frame: Option<f64>,
}

impl Engine {
    /// Builds an engine from a validated config and a setup pass.
    ///
    /// The setup pass registers hooks, systems and initial entities; it
    /// runs exactly once, before the first tick.
    pub fn new(
        config: &RuntimeConfig,
        setup: impl FnOnce(&mut World, &mut Scheduler) -> Result<(), EngineError>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            capacity = config.capacity,
            tick_hz = config.tick_hz,
            "building engine"
        );

        let mut world = World::new(config.capacity);
        let mut scheduler = Scheduler::new();
        setup(&mut world, &mut scheduler)?;

        Ok(Self {
            world,
            scheduler,
            timestep: FixedTimestep::new(config.tick_hz, config.max_frame_dt),
            last_frame: None,
        })
    }

    /// The simulation world.
    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulation world, mutably.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Runs one frame: N owed sim ticks, then one presentation sweep.
    ///
    /// `now` is monotonic seconds; the first frame simulates nothing and
    /// just establishes the baseline.
    pub fn frame(&mut self, now: f64, input: &InputSnapshot) -> FramePlan {
        let frame_dt = match self.last_frame {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_frame = Some(now);

        let plan = self.timestep.advance(frame_dt);
        let step = plan.step as f32;
        for _ in 0..plan.sim_ticks {
            self.scheduler.tick(&mut self.world, step, input);
        }
        self.scheduler.present(&mut self.world, plan.frame_dt as f32);
        plan
    }

    /// Drives frames off the platform until it asks to close.
    pub fn run(&mut self, platform: &mut dyn Platform) {
        info!("entering frame loop");
        while !platform.should_close() {
            let input = platform.pump_input();
            let now = platform.now();
            self.frame(now, &input);
        }
        debug!(alive = self.world.alive_count(), "frame loop ended");
    }
}
