//! Fixed-timestep frame pacing.
//!
//! Wall-clock frame deltas are clamped and accumulated; the accumulator
//! pays out whole simulation steps, and the remainder carries over. Tick
//! cadence is therefore independent of render cadence: a slow frame runs
//! several ticks, a fast frame may run none, and a debugger pause never
//! triggers a catch-up spiral.

/// What one frame owes: how many fixed steps to simulate, then one
/// presentation sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    /// Number of fixed simulation steps to run.
    pub sim_ticks: u32,
    /// The fixed step in seconds, for each sim tick.
    pub step: f64,
    /// The clamped frame delta in seconds, for the presentation sweep.
    pub frame_dt: f64,
}

/// Accumulator-based fixed timestep.
#[derive(Clone, Copy, Debug)]
pub struct FixedTimestep {
    step: f64,
    max_frame_dt: f64,
    accumulator: f64,
}

impl FixedTimestep {
    /// Creates a timestep running at `tick_hz` steps per second, clamping
    /// each frame delta to `max_frame_dt`.
    #[must_use]
    pub fn new(tick_hz: f64, max_frame_dt: f64) -> Self {
        Self {
            step: 1.0 / tick_hz,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// The fixed step in seconds.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Feeds one frame's wall-clock delta and returns the frame's plan.
    ///
    /// Negative deltas (clock adjustment) count as zero.
    pub fn advance(&mut self, frame_dt: f64) -> FramePlan {
        let clamped = frame_dt.clamp(0.0, self.max_frame_dt);
        self.accumulator += clamped;

        let mut sim_ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            sim_ticks += 1;
        }

        FramePlan {
            sim_ticks,
            step: self.step,
            frame_dt: clamped,
        }
    }

    /// Leftover simulated-but-unrendered time, in [0, step).
    ///
    /// Presentation interpolates by `alpha = remainder / step`.
    #[inline]
    #[must_use]
    pub const fn remainder(&self) -> f64 {
        self.accumulator
    }
}
