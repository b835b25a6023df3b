//! # Phase-Ordered Scheduler
//!
//! Systems are plain callables registered into fixed phases with an
//! explicit order key. Within a phase, systems run in ascending order;
//! ties run in registration order. There is no dependency graph and no
//! parallelism: the run order is fully determined by (phase, order,
//! registration sequence), which makes a tick reproducible by
//! construction.
//!
//! Between sim phases the scheduler drains deferred destruction, so a
//! system marking entities in one phase is guaranteed the next phase
//! never sees them.

use lantern_core::World;

use crate::input::InputSnapshot;

/// Hard cap on systems per phase; registrations past it are dropped.
pub const MAX_SYSTEMS_PER_PHASE: usize = 64;

/// Execution phases, in run order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    /// Input sampling and intent derivation.
    Input = 0,
    /// Gameplay logic before physics.
    SimPre = 1,
    /// Movement integration and collision response.
    Physics = 2,
    /// Gameplay logic after physics (proximity, reactions).
    SimPost = 3,
    /// Diagnostics over the settled tick state.
    Debug = 4,
    /// Per-frame smoothing between the last two tick states.
    Present = 5,
    /// Draw submission.
    Render = 6,
}

impl Phase {
    /// Number of phases.
    pub const COUNT: usize = 7;

    /// Phases executed once per simulation tick, in order.
    pub const SIM: [Self; 5] = [
        Self::Input,
        Self::SimPre,
        Self::Physics,
        Self::SimPost,
        Self::Debug,
    ];

    /// Phases executed once per rendered frame, in order.
    pub const FRAME: [Self; 2] = [Self::Present, Self::Render];
}

/// Everything a system receives besides the world.
pub struct SystemCtx<'a> {
    /// Delta time in seconds: the fixed step during sim phases, the
    /// clamped frame delta during frame phases.
    pub dt: f32,
    /// The frame's input snapshot; `None` during frame phases.
    pub input: Option<&'a InputSnapshot>,
}

/// A schedulable unit of simulation work.
pub trait System {
    /// Runs the system for one phase execution.
    fn run(&mut self, world: &mut World, ctx: &SystemCtx<'_>);
}

impl<F> System for F
where
    F: FnMut(&mut World, &SystemCtx<'_>),
{
    fn run(&mut self, world: &mut World, ctx: &SystemCtx<'_>) {
        self(world, ctx);
    }
}

struct Entry {
    order: i32,
    name: &'static str,
    system: Box<dyn System>,
}

/// Fixed-phase system scheduler.
#[derive(Default)]
pub struct Scheduler {
    phases: [Vec<Entry>; Phase::COUNT],
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a system into `phase` at `order`.
    ///
    /// Equal orders keep registration order. Returns `false` if the phase
    /// is already at [`MAX_SYSTEMS_PER_PHASE`]; the registration is then
    /// logged and dropped, because a missing system is observable while a
    /// resized table mid-run is not.
    pub fn add_system(
        &mut self,
        phase: Phase,
        order: i32,
        name: &'static str,
        system: Box<dyn System>,
    ) -> bool {
        let entries = &mut self.phases[phase as usize];
        if entries.len() >= MAX_SYSTEMS_PER_PHASE {
            tracing::error!(?phase, name, "phase is full, system dropped");
            return false;
        }
        let at = entries.partition_point(|e| e.order <= order);
        entries.insert(at, Entry { order, name, system });
        true
    }

    /// Runs one simulation tick: every sim phase in order, draining
    /// deferred destruction after each phase.
    pub fn tick(&mut self, world: &mut World, step: f32, input: &InputSnapshot) {
        for phase in Phase::SIM {
            self.run_phase(phase, world, step, Some(input));
            world.destroy_marked();
        }
    }

    /// Runs the frame phases (Present, Render) with the clamped frame
    /// delta and no input.
    pub fn present(&mut self, world: &mut World, frame_dt: f32) {
        for phase in Phase::FRAME {
            self.run_phase(phase, world, frame_dt, None);
        }
    }

    /// Runs a single phase's systems in order.
    ///
    /// `tick` and `present` are the composite sweeps; this is the
    /// building block for driving one phase in isolation (editor
    /// stepping, tests). The scheduler does no error handling and no
    /// destroy draining here.
    pub fn run_phase(
        &mut self,
        phase: Phase,
        world: &mut World,
        dt: f32,
        input: Option<&InputSnapshot>,
    ) {
        let ctx = SystemCtx { dt, input };
        for entry in &mut self.phases[phase as usize] {
            entry.system.run(world, &ctx);
        }
    }

    /// Registered `(name, order)` pairs for `phase`, in run order.
    pub fn phase_systems(&self, phase: Phase) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.phases[phase as usize].iter().map(|e| (e.name, e.order))
    }

    /// Removes every registered system.
    pub fn reset(&mut self) {
        for entries in &mut self.phases {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Box<dyn System> {
        let log = Rc::clone(log);
        Box::new(move |_: &mut World, _: &SystemCtx<'_>| log.borrow_mut().push(tag))
    }

    #[test]
    fn test_order_key_then_registration_order() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        scheduler.add_system(Phase::SimPre, 10, "b", recorder(&log, "b"));
        scheduler.add_system(Phase::SimPre, -5, "a", recorder(&log, "a"));
        scheduler.add_system(Phase::SimPre, 10, "c", recorder(&log, "c"));

        let mut world = World::new(4);
        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_phases_run_in_declared_order() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        scheduler.add_system(Phase::Debug, 0, "debug", recorder(&log, "debug"));
        scheduler.add_system(Phase::Input, 0, "input", recorder(&log, "input"));
        scheduler.add_system(Phase::Physics, 0, "physics", recorder(&log, "physics"));
        scheduler.add_system(Phase::Present, 0, "present", recorder(&log, "present"));

        let mut world = World::new(4);
        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        // Frame phases only run in present().
        assert_eq!(*log.borrow(), vec!["input", "physics", "debug"]);

        scheduler.present(&mut world, 0.016);
        assert_eq!(*log.borrow(), vec!["input", "physics", "debug", "present"]);
    }

    #[test]
    fn test_phase_overflow_drops_registration() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..MAX_SYSTEMS_PER_PHASE {
            assert!(scheduler.add_system(Phase::Input, 0, "fill", recorder(&log, "fill")));
        }
        assert!(!scheduler.add_system(Phase::Input, 0, "extra", recorder(&log, "extra")));

        assert_eq!(
            scheduler.phase_systems(Phase::Input).count(),
            MAX_SYSTEMS_PER_PHASE
        );
        assert!(!scheduler
            .phase_systems(Phase::Input)
            .any(|(n, _)| n == "extra"));
    }

    #[test]
    fn test_marks_drained_between_phases() {
        let mut scheduler = Scheduler::new();
        let mut world = World::new(4);
        let id = world.create();

        // SimPre marks; Physics must already see the entity gone.
        scheduler.add_system(
            Phase::SimPre,
            0,
            "marker",
            Box::new(move |w: &mut World, _: &SystemCtx<'_>| w.mark_for_destroy(id)),
        );
        let seen_alive = Rc::new(RefCell::new(true));
        let seen = Rc::clone(&seen_alive);
        scheduler.add_system(
            Phase::Physics,
            0,
            "observer",
            Box::new(move |w: &mut World, _: &SystemCtx<'_>| {
                *seen.borrow_mut() = w.is_alive(id);
            }),
        );

        scheduler.tick(&mut world, 1.0 / 60.0, &InputSnapshot::default());
        assert!(!*seen_alive.borrow());
        assert!(!world.is_alive(id));
    }

    #[test]
    fn test_present_receives_no_input() {
        let mut scheduler = Scheduler::new();
        let got_input = Rc::new(RefCell::new(true));
        let got = Rc::clone(&got_input);
        scheduler.add_system(
            Phase::Render,
            0,
            "probe",
            Box::new(move |_: &mut World, ctx: &SystemCtx<'_>| {
                *got.borrow_mut() = ctx.input.is_some();
            }),
        );

        let mut world = World::new(4);
        scheduler.present(&mut world, 0.016);
        assert!(!*got_input.borrow());
    }

    #[test]
    fn test_run_phase_drives_one_phase_in_isolation() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.add_system(Phase::Input, 0, "input", recorder(&log, "input"));
        scheduler.add_system(Phase::Physics, 0, "physics", recorder(&log, "physics"));

        let mut world = World::new(4);
        let input = InputSnapshot::default();
        scheduler.run_phase(Phase::Physics, &mut world, 1.0 / 60.0, Some(&input));
        assert_eq!(*log.borrow(), vec!["physics"]);
    }

    #[test]
    fn test_reset_clears_all_phases() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.add_system(Phase::Input, 0, "a", recorder(&log, "a"));
        scheduler.reset();
        assert_eq!(scheduler.phase_systems(Phase::Input).count(), 0);
    }
}
