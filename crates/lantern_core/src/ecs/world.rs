//! # ECS World
//!
//! The owning aggregate for all entity and component state. Pre-allocates
//! every table at creation time; no global state, systems receive the
//! world by reference.
//!
//! ## Lifecycle invariants
//!
//! - At most one live handle value aliases a slot at any time; once the
//!   slot's generation advances, every previously issued handle is
//!   permanently rejected by `is_alive`.
//! - Component cells are meaningful only while the slot's mask bit is
//!   set; destruction clears the mask, never the cells.
//! - Operations on dead or stale handles are silent no-ops: deferred
//!   destruction makes transient stale references routine.

use super::component::{
    Body, Collider, Component, ComponentKind, Position, Sprite, Trigger, Velocity,
};
use super::entity::{DestroyState, EntityId, Slot};
use super::hooks::{ComponentHook, HookRegistry};
use super::proximity::{self, ProxPair, ProximitySet};
use super::storage::ComponentStorage;

/// Default entity capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Mask an entity must satisfy for the body-created hook to fire.
const BODY_REQ: u64 = ComponentKind::Position.bit()
    | ComponentKind::Collider.bit()
    | ComponentKind::Body.bit();

/// All component storages, index-aligned with the slot table.
///
/// Passed to hooks separately from the entity table so teardown callbacks
/// can mutate component data while the table drives the teardown.
pub struct Components {
    /// Position cells.
    pub positions: ComponentStorage<Position>,
    /// Velocity cells.
    pub velocities: ComponentStorage<Velocity>,
    /// Collider cells.
    pub colliders: ComponentStorage<Collider>,
    /// Trigger cells.
    pub triggers: ComponentStorage<Trigger>,
    /// Sprite cells.
    pub sprites: ComponentStorage<Sprite>,
    /// Body cells.
    pub bodies: ComponentStorage<Body>,
}

impl Components {
    fn new(capacity: usize) -> Self {
        Self {
            positions: ComponentStorage::new(capacity),
            velocities: ComponentStorage::new(capacity),
            colliders: ComponentStorage::new(capacity),
            triggers: ComponentStorage::new(capacity),
            sprites: ComponentStorage::new(capacity),
            bodies: ComponentStorage::new(capacity),
        }
    }
}

/// The ECS world: slot table, free list, component storages, hooks and
/// the proximity pair buffers.
pub struct World {
    slots: Box<[Slot]>,
    free: Vec<u32>,
    alive_count: usize,
    capacity: usize,
    hooks: HookRegistry,
    /// Component storages. Systems scan these directly, mask-gated.
    pub components: Components,
    proximity: ProximitySet,
}

impl World {
    /// Creates a world with the given entity capacity, all memory
    /// pre-allocated.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        let slots = vec![Slot::default(); capacity].into_boxed_slice();
        // Reversed so slot 0 is handed out first.
        let free: Vec<u32> = (0..capacity as u32).rev().collect();

        Self {
            slots,
            free,
            alive_count: 0,
            capacity,
            hooks: HookRegistry::default(),
            components: Components::new(capacity),
            proximity: ProximitySet::default(),
        }
    }

    /// Returns the fixed entity capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates an entity, reusing a free slot.
    ///
    /// Returns [`EntityId::NULL`] when the pool is exhausted. That is a
    /// capacity condition, not a fault: callers decide whether a failed
    /// spawn is skippable or worth escalating.
    #[inline]
    pub fn create(&mut self) -> EntityId {
        let Some(index) = self.free.pop() else {
            tracing::error!(capacity = self.capacity, "entity pool exhausted");
            return EntityId::NULL;
        };

        let idx = index as usize;
        let slot = &mut self.slots[idx];
        let generation = if slot.next_generation == 0 {
            1
        } else {
            slot.next_generation
        };
        slot.generation = generation;
        slot.mask = 0;
        slot.destroy_state = DestroyState::None;
        self.alive_count += 1;

        EntityId::new(index, generation)
    }

    /// Checks whether a handle refers to a live entity.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Resolves a handle to its slot index, rejecting stale generations.
    #[inline]
    #[must_use]
    pub fn slot_of(&self, id: EntityId) -> Option<usize> {
        let idx = id.index() as usize;
        if idx >= self.capacity {
            return None;
        }
        let slot = &self.slots[idx];
        (slot.generation == id.generation() && id.generation() != 0).then_some(idx)
    }

    /// Whether the slot at `index` currently holds a live entity.
    #[inline]
    #[must_use]
    pub fn is_alive_index(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.generation != 0)
    }

    /// The live handle for the slot at `index` (null if the slot is dead).
    #[inline]
    #[must_use]
    pub fn handle_at(&self, index: usize) -> EntityId {
        match self.slots.get(index) {
            Some(slot) if slot.generation != 0 => EntityId::new(index as u32, slot.generation),
            _ => EntityId::NULL,
        }
    }

    /// The component mask of the slot at `index` (0 if dead or out of range).
    #[inline]
    #[must_use]
    pub fn mask_at(&self, index: usize) -> u64 {
        match self.slots.get(index) {
            Some(slot) if slot.generation != 0 => slot.mask,
            _ => 0,
        }
    }

    /// Destroys an entity immediately.
    ///
    /// Runs every destroy hook for every set mask bit (kind enumeration
    /// order, registration order within a kind), then clears the mask and
    /// advances the slot's generation. Idempotent on dead/stale handles.
    /// Slots whose hooks already ran via `cleanup_marked` are finalized
    /// without re-running them.
    pub fn destroy(&mut self, id: EntityId) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        if self.slots[idx].destroy_state != DestroyState::Cleaned {
            self.run_teardown_hooks(idx);
        }
        self.finalize_destroy(idx);
    }

    /// Flags an entity for deferred destruction without running hooks.
    ///
    /// Required when a system must not mutate the entity set mid-scan;
    /// the scheduler drains marks at phase boundaries.
    pub fn mark_for_destroy(&mut self, id: EntityId) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        if self.slots[idx].destroy_state == DestroyState::None {
            self.slots[idx].destroy_state = DestroyState::Marked;
        }
    }

    /// Runs teardown hooks for every marked slot, leaving the slots alive.
    ///
    /// First stage of the deferred pipeline: external resources are
    /// released at a safe point while handles still validate, so systems
    /// later in the tick see a consistent entity set.
    pub fn cleanup_marked(&mut self) {
        for idx in 0..self.capacity {
            if self.slots[idx].destroy_state != DestroyState::Marked {
                continue;
            }
            if self.slots[idx].generation == 0 {
                self.slots[idx].destroy_state = DestroyState::None;
                continue;
            }
            self.run_teardown_hooks(idx);
            self.slots[idx].destroy_state = DestroyState::Cleaned;
        }
    }

    /// Frees every marked slot, running hooks for slots not yet cleaned.
    ///
    /// Final stage of the deferred pipeline; after this, marked handles
    /// are stale.
    pub fn destroy_marked(&mut self) {
        for idx in 0..self.capacity {
            if self.slots[idx].destroy_state == DestroyState::None {
                continue;
            }
            if self.slots[idx].generation == 0 {
                self.slots[idx].destroy_state = DestroyState::None;
                continue;
            }
            if self.slots[idx].destroy_state == DestroyState::Marked {
                self.run_teardown_hooks(idx);
            }
            self.finalize_destroy(idx);
        }
    }

    fn run_teardown_hooks(&mut self, idx: usize) {
        let mask = self.slots[idx].mask;
        let Self {
            hooks, components, ..
        } = self;
        for kind in ComponentKind::ALL {
            if mask & kind.bit() != 0 {
                hooks.run_destroy(kind, components, idx);
            }
        }
    }

    fn finalize_destroy(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        let mut next = slot.generation.wrapping_add(1);
        if next == 0 {
            next = 1;
        }
        slot.generation = 0;
        slot.next_generation = next;
        slot.mask = 0;
        slot.destroy_state = DestroyState::None;
        self.free.push(idx as u32);
        self.alive_count -= 1;
    }

    // =========================================================================
    // Hook registration (one-time startup pass)
    // =========================================================================

    /// Appends a destroy hook for `kind`.
    ///
    /// Must happen before any entities exist; hooks are not retroactively
    /// applied, so late registration is logged as an ordering error and
    /// the system continues degraded.
    pub fn register_destroy_hook(&mut self, kind: ComponentKind, hook: ComponentHook) {
        if self.alive_count > 0 {
            tracing::warn!(
                ?kind,
                alive = self.alive_count,
                "destroy hook registered after entities exist"
            );
        }
        self.hooks.add_destroy(kind, hook);
    }

    /// Installs the body-created hook.
    ///
    /// Fires synchronously whenever an add operation completes the
    /// `Position | Collider | Body` requirement on a slot whose body is
    /// not yet materialized. The world marks the body created after the
    /// hook returns.
    pub fn register_body_created_hook(&mut self, hook: ComponentHook) {
        if self.alive_count > 0 {
            tracing::warn!(
                alive = self.alive_count,
                "body-created hook registered after entities exist"
            );
        }
        self.hooks.set_body_created(hook);
    }

    // =========================================================================
    // Component adders - silent no-ops on dead/stale handles
    // =========================================================================

    /// Attaches a position.
    pub fn add_position(&mut self, id: EntityId, x: f32, y: f32) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.components.positions.set(idx, Position::new(x, y));
        self.slots[idx].mask |= ComponentKind::Position.bit();
        self.try_create_body(idx);
    }

    /// Attaches a velocity.
    pub fn add_velocity(&mut self, id: EntityId, x: f32, y: f32) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.components.velocities.set(idx, Velocity::new(x, y));
        self.slots[idx].mask |= ComponentKind::Velocity.bit();
    }

    /// Attaches AABB half-extents.
    pub fn add_collider(&mut self, id: EntityId, hx: f32, hy: f32) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.components.colliders.set(idx, Collider::new(hx, hy));
        self.slots[idx].mask |= ComponentKind::Collider.bit();
        self.try_create_body(idx);
    }

    /// Attaches a trigger volume.
    pub fn add_trigger(&mut self, id: EntityId, pad: f32, target_mask: u64) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.components
            .triggers
            .set(idx, Trigger::new(pad, target_mask));
        self.slots[idx].mask |= ComponentKind::Trigger.bit();
    }

    /// Attaches a sprite.
    ///
    /// The texture reference inside must already be retained on the
    /// entity's behalf; the sprite destroy hook is responsible for the
    /// matching release.
    pub fn add_sprite(&mut self, id: EntityId, sprite: Sprite) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.components.sprites.set(idx, sprite);
        self.slots[idx].mask |= ComponentKind::Sprite.bit();
    }

    /// Attaches a physics body (not yet materialized).
    pub fn add_body(&mut self, id: EntityId, body: Body) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.components.bodies.set(idx, body);
        self.slots[idx].mask |= ComponentKind::Body.bit();
        self.try_create_body(idx);
    }

    /// Attaches the player tag (mask-only).
    pub fn add_player(&mut self, id: EntityId) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        self.slots[idx].mask |= ComponentKind::Player.bit();
    }

    /// Detaches a single component kind without destroying the entity.
    ///
    /// Runs the kind's destroy hooks first, for symmetry with entity
    /// teardown, then clears the bit. No-op if the bit was not set.
    pub fn remove(&mut self, id: EntityId, kind: ComponentKind) {
        let Some(idx) = self.slot_of(id) else {
            return;
        };
        if self.slots[idx].mask & kind.bit() == 0 {
            return;
        }
        let Self {
            hooks, components, ..
        } = self;
        hooks.run_destroy(kind, components, idx);
        self.slots[idx].mask &= !kind.bit();
    }

    /// Fires the body-created hook if the slot just completed the
    /// requirement mask and is not yet materialized.
    fn try_create_body(&mut self, idx: usize) {
        if self.slots[idx].mask & BODY_REQ != BODY_REQ {
            return;
        }
        if self.components.bodies.as_slice()[idx].is_created() {
            return;
        }
        if !self.hooks.has_body_created() {
            return;
        }
        let Self {
            hooks, components, ..
        } = self;
        hooks.fire_body_created(components, idx);
        if let Some(body) = self.components.bodies.get_mut(idx) {
            body.created = 1;
        }
    }

    /// Catch-up pass: fires the body-created hook for every live entity
    /// that satisfies the requirement but was never materialized.
    ///
    /// The physics system runs this at the top of its phase so entities
    /// assembled before hook installation still participate.
    pub fn materialize_bodies(&mut self) {
        for idx in 0..self.capacity {
            if self.slots[idx].generation != 0 {
                self.try_create_body(idx);
            }
        }
    }

    // =========================================================================
    // Mask-gated reads
    // =========================================================================

    /// Whether the entity holds the given component kind.
    #[inline]
    #[must_use]
    pub fn has(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.slot_of(id)
            .is_some_and(|idx| self.slots[idx].mask & kind.bit() != 0)
    }

    /// Reads a component value, gated by liveness and the mask bit.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> Option<C>
    where
        Components: StorageOf<C>,
    {
        let idx = self.slot_of(id)?;
        if self.slots[idx].mask & C::KIND.bit() == 0 {
            return None;
        }
        self.components.storage().get(idx).copied()
    }

    /// The entity's component mask, or `None` for dead/stale handles.
    #[inline]
    #[must_use]
    pub fn mask_of(&self, id: EntityId) -> Option<u64> {
        self.slot_of(id).map(|idx| self.slots[idx].mask)
    }

    /// Iterates the handles of all alive entities in slot order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            (slot.generation != 0).then(|| EntityId::new(idx as u32, slot.generation))
        })
    }

    /// First alive entity whose mask contains all bits of `mask`.
    #[must_use]
    pub fn find_first(&self, mask: u64) -> EntityId {
        for (idx, slot) in self.slots.iter().enumerate() {
            if slot.generation != 0 && slot.mask & mask == mask {
                return EntityId::new(idx as u32, slot.generation);
            }
        }
        EntityId::NULL
    }

    /// Counts alive entities matching each of the given masks (debug/HUD
    /// helper).
    #[must_use]
    pub fn count_matching(&self, masks: &[u64]) -> Vec<usize> {
        let mut counts = vec![0usize; masks.len()];
        for slot in self.slots.iter() {
            if slot.generation == 0 {
                continue;
            }
            for (count, &mask) in counts.iter_mut().zip(masks) {
                if slot.mask & mask == mask {
                    *count += 1;
                }
            }
        }
        counts
    }

    // =========================================================================
    // Proximity views
    // =========================================================================

    /// Recomputes the proximity pair set from the live entity layout.
    ///
    /// Registered once per tick in SimPost; the previous tick's set
    /// becomes the comparison baseline for enter/exit.
    pub fn rebuild_proximity(&mut self) {
        proximity::rebuild(&mut self.proximity, &self.slots, &self.components);
    }

    /// Drops both proximity buffers (full reset; pairs never persist).
    pub fn reset_proximity(&mut self) {
        self.proximity.reset();
    }

    /// Every pair overlapping this tick, alive-filtered.
    pub fn prox_stay(&self) -> impl Iterator<Item = ProxPair> + '_ {
        self.proximity
            .current()
            .iter()
            .copied()
            .filter(|p| self.is_alive(p.trigger_owner) && self.is_alive(p.matched))
    }

    /// Pairs overlapping this tick but not last tick (first contact).
    pub fn prox_enter(&self) -> impl Iterator<Item = ProxPair> + '_ {
        let previous = self.proximity.previous();
        self.proximity
            .current()
            .iter()
            .copied()
            .filter(move |p| {
                self.is_alive(p.trigger_owner)
                    && self.is_alive(p.matched)
                    && !previous.contains(p)
            })
    }

    /// Pairs overlapping last tick but not this tick (contact ended).
    ///
    /// Membership-tested, not liveness-tested: an entity destroyed while
    /// overlapping is absent from the current buffer and therefore still
    /// produces its exit event on the tick it disappears.
    pub fn prox_exit(&self) -> impl Iterator<Item = ProxPair> + '_ {
        let current = self.proximity.current();
        self.proximity
            .previous()
            .iter()
            .copied()
            .filter(move |p| !current.contains(p))
    }
}

/// Maps a component payload type to its storage field.
///
/// The kind set is closed, so this is the tagged-dispatch seam that lets
/// [`World::get`] stay generic without any runtime type registry.
pub trait StorageOf<C: Component> {
    /// The storage array for `C`.
    fn storage(&self) -> &ComponentStorage<C>;
}

macro_rules! impl_storage_of {
    ($component:ty, $field:ident) => {
        impl StorageOf<$component> for Components {
            #[inline]
            fn storage(&self) -> &ComponentStorage<$component> {
                &self.$field
            }
        }
    };
}

impl_storage_of!(Position, positions);
impl_storage_of!(Velocity, velocities);
impl_storage_of!(Collider, colliders);
impl_storage_of!(Trigger, triggers);
impl_storage_of!(Sprite, sprites);
impl_storage_of!(Body, bodies);
