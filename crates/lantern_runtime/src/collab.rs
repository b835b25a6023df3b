//! Collaborator seams.
//!
//! The runtime talks to everything outside the simulation through these
//! traits: texture ownership, static-world collision and the host
//! platform. Headless tests plug in stubs; the demo binary plugs in a
//! synthetic platform.

use lantern_core::{Collider, Position, TexHandle};

use crate::input::InputSnapshot;

/// Reference-counted texture ownership.
///
/// Sprites hold [`TexHandle`]s retained on the entity's behalf; the
/// sprite destroy hook performs the matching release. Handles are
/// generational, so `is_valid` must be checked before releasing a handle
/// that may have outlived its texture.
pub trait TextureStore {
    /// Loads (or finds) the texture at `path` and returns a handle with
    /// one reference taken.
    fn acquire(&mut self, path: &str) -> TexHandle;
    /// Takes a reference on the texture.
    fn retain(&mut self, tex: TexHandle);
    /// Drops a reference on the texture.
    fn release(&mut self, tex: TexHandle);
    /// Whether the handle still names a live texture.
    fn is_valid(&self, tex: TexHandle) -> bool;
}

/// Query interface over static solid geometry.
///
/// The integrator hands each axis displacement to `resolve_overlap` and
/// applies whatever position comes back; it never learns how the world
/// stores its geometry.
pub trait CollisionQuery {
    /// Corrects an AABB that may stand inside a solid, returning the
    /// nearest non-overlapping position (flush against the contact).
    /// Positions already clear of solids come back unchanged.
    fn resolve_overlap(&self, pos: Position, collider: Collider) -> Position;

    /// Whether an AABB at `pos` with the given half-extents is free of
    /// solids (spawn-point and pathing checks).
    fn is_walkable(&self, pos: Position, collider: Collider) -> bool;
}

/// Blanket pass-through world with no solids, for headless runs.
pub struct NoCollision;

impl CollisionQuery for NoCollision {
    fn resolve_overlap(&self, pos: Position, _collider: Collider) -> Position {
        pos
    }

    fn is_walkable(&self, _pos: Position, _collider: Collider) -> bool {
        true
    }
}

/// The host environment driving the engine loop.
pub trait Platform {
    /// Monotonic time in seconds.
    fn now(&mut self) -> f64;
    /// Pumps native events into this frame's input snapshot.
    fn pump_input(&mut self) -> InputSnapshot;
    /// Whether the host asked the loop to stop.
    fn should_close(&self) -> bool;
}
