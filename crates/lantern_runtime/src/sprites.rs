//! Sprite attachment and texture lifetime.
//!
//! A sprite's texture reference is owned by the entity: attaching retains,
//! the destroy hook releases. The hook tolerates handles whose texture was
//! dropped out from under them (store teardown before world teardown), so
//! it validates before releasing.

use std::cell::RefCell;
use std::rc::Rc;

use lantern_core::{ComponentKind, EntityId, Rect, Sprite, TexHandle, World};

use crate::collab::TextureStore;

/// Shared handle to the texture store, cloneable into hooks and systems.
pub type SharedTextureStore = Rc<RefCell<dyn TextureStore>>;

/// Registers the sprite destroy hook that releases the entity's texture
/// reference.
///
/// Call once at startup, before any sprites exist.
pub fn register_sprite_hooks(world: &mut World, store: &SharedTextureStore) {
    let store = Rc::clone(store);
    world.register_destroy_hook(
        ComponentKind::Sprite,
        Box::new(move |components, index| {
            let Some(sprite) = components.sprites.get(index) else {
                return;
            };
            let tex = sprite.texture;
            let mut store = store.borrow_mut();
            if store.is_valid(tex) {
                store.release(tex);
            } else {
                tracing::debug!(?tex, "sprite released after its texture was dropped");
            }
        }),
    );
}

/// Attaches a sprite to an entity, retaining the texture on its behalf.
///
/// No-op on dead/stale handles; in that case the reference is not taken.
pub fn attach_sprite(
    world: &mut World,
    store: &SharedTextureStore,
    id: EntityId,
    tex: TexHandle,
    src: Rect,
    origin: (f32, f32),
) {
    if !world.is_alive(id) {
        return;
    }
    store.borrow_mut().retain(tex);
    world.add_sprite(
        id,
        Sprite {
            texture: tex,
            src,
            origin_x: origin.0,
            origin_y: origin.1,
        },
    );
}
