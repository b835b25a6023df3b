//! # LANTERN Core Kernel
//!
//! Fixed-capacity Entity Component System designed for:
//! - High entity churn (create/destroy every tick) with no stale aliasing
//! - Zero allocations in the tick path - all storage pre-allocated
//! - Deterministic full-table scans instead of query planning
//!
//! ## Architecture Rules
//!
//! 1. **Generations gate liveness** - a handle is valid only while its
//!    generation matches the slot's current generation
//! 2. **Masks gate storage** - a component cell is meaningful only while
//!    its mask bit is set; cells are never zeroed on destroy
//! 3. **Data-oriented design** - one dense array per component kind,
//!    index-aligned with the entity table

pub mod ecs;

pub use ecs::component::{
    Body, BodyKind, Collider, Component, ComponentKind, Position, Rect, Sprite, TexHandle,
    Trigger, Velocity,
};
pub use ecs::entity::EntityId;
pub use ecs::hooks::ComponentHook;
pub use ecs::proximity::ProxPair;
pub use ecs::storage::ComponentStorage;
pub use ecs::world::{Components, StorageOf, World, DEFAULT_CAPACITY};
