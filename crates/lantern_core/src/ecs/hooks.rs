//! # Hook Registry
//!
//! Lets independently owned subsystems react to entity teardown without
//! the kernel depending on them. A subsystem registers, once at startup,
//! a cleanup callback for the component kind it owns resources for (for
//! example a sprite hook that releases a texture reference), plus one
//! distinguished creation hook that lazily materializes a physics body the
//! moment a slot holds `Position | Collider | Body`.
//!
//! Contract: hooks must tolerate already-invalid external state (check
//! validity before releasing), because teardown order across kinds is the
//! kind enumeration order, not a dependency-resolved order.

use super::component::ComponentKind;
use super::world::Components;

/// Cleanup callback for one component kind.
///
/// Receives the component storages and the slot index being torn down.
/// The entity table itself is not passed: at hook time the slot's mask is
/// still intact but its fate is sealed.
pub type ComponentHook = Box<dyn FnMut(&mut Components, usize)>;

/// Per-kind destroy-hook lists plus the single body-created hook.
#[derive(Default)]
pub(crate) struct HookRegistry {
    destroy: [Vec<ComponentHook>; ComponentKind::COUNT],
    body_created: Option<ComponentHook>,
}

impl HookRegistry {
    /// Appends a destroy hook to `kind`'s list.
    pub fn add_destroy(&mut self, kind: ComponentKind, hook: ComponentHook) {
        self.destroy[kind as usize].push(hook);
    }

    /// Installs (or replaces) the body-created hook.
    pub fn set_body_created(&mut self, hook: ComponentHook) {
        if self.body_created.is_some() {
            tracing::warn!("body-created hook replaced; only one can be installed");
        }
        self.body_created = Some(hook);
    }

    /// Whether a body-created hook is installed.
    pub fn has_body_created(&self) -> bool {
        self.body_created.is_some()
    }

    /// Runs every destroy hook registered for `kind`, in registration order.
    pub fn run_destroy(&mut self, kind: ComponentKind, components: &mut Components, index: usize) {
        for hook in &mut self.destroy[kind as usize] {
            hook(components, index);
        }
    }

    /// Fires the body-created hook, if one is installed.
    pub fn fire_body_created(&mut self, components: &mut Components, index: usize) {
        if let Some(hook) = &mut self.body_created {
            hook(components, index);
        }
    }
}
