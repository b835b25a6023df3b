//! # LANTERN Runtime
//!
//! The layer between the ECS kernel and the host platform:
//! - **Scheduler** - fixed phases, explicit order keys, deterministic
//!   run order, deferred-destroy draining at phase boundaries
//! - **Fixed timestep** - accumulator pacing with frame-delta clamping
//! - **Built-in systems** - player input, movement integration, the
//!   per-tick proximity rebuild
//! - **Collaborator seams** - texture store, collision query and
//!   platform traits for hosts and headless tests
//!
//! All configuration is loaded before the world is built; nothing here
//! allocates in the tick path.

pub mod collab;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod schedule;
pub mod sprites;
pub mod step;
pub mod systems;

pub use collab::{CollisionQuery, NoCollision, Platform, TextureStore};
pub use config::RuntimeConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use input::{Button, InputSnapshot};
pub use schedule::{Phase, Scheduler, System, SystemCtx, MAX_SYSTEMS_PER_PHASE};
pub use sprites::{attach_sprite, register_sprite_hooks, SharedTextureStore};
pub use step::{FixedTimestep, FramePlan};
pub use systems::register_builtin_systems;
