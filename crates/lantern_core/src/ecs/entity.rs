//! # Entity Handles
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into the slot table and component arrays
//! - A generation counter for safe slot reuse
//!
//! Generation 0 is reserved to mean "dead / never allocated", so live
//! generations start at 1 and advance on every destroy-then-reuse cycle.

/// Unique identifier for an entity.
///
/// The ID is split into two parts:
/// - Lower 32 bits: index into the slot table
/// - Upper 32 bits: generation counter for detecting stale references
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an entity ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// The null sentinel: maximum index, generation 0.
    ///
    /// Returned by `World::create` on pool exhaustion; never alive.
    pub const NULL: Self = Self::new(u32::MAX, 0);

    /// Checks whether this is the null sentinel.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == Self::NULL.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

/// Deferred-destruction state of a slot.
///
/// Marking flags a slot without running hooks; `cleanup` runs hooks while
/// the slot stays alive; the final sweep frees the slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DestroyState {
    /// Not scheduled for destruction.
    #[default]
    None,
    /// Scheduled; hooks not yet run.
    Marked,
    /// Hooks ran; awaiting the final sweep.
    Cleaned,
}

/// One entry of the fixed slot table.
///
/// `generation` is 0 while the slot is dead; `next_generation` stashes the
/// value the next `create` on this slot will hand out, so stale handles
/// from the previous occupancy can never validate again.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Slot {
    /// Current generation (0 == dead).
    pub generation: u32,
    /// Generation the next occupant of this slot will receive.
    pub next_generation: u32,
    /// Bitmask of attached component kinds.
    pub mask: u64,
    /// Deferred-destruction state.
    pub destroy_state: DestroyState,
}
