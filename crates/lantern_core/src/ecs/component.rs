//! # Component Kinds and Payloads
//!
//! Components are pure data containers with no behavior. The kind set is
//! closed and enumerated at build time: each kind owns one bit of the
//! per-slot mask, and presence of that bit is the one and only license to
//! read the kind's storage cell.

use bytemuck::{Pod, Zeroable};

/// The closed set of component kinds.
///
/// `Player` is a mask-only tag with no backing storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComponentKind {
    /// World-space position.
    Position = 0,
    /// Movement intent in units per second.
    Velocity = 1,
    /// AABB half-extents.
    Collider = 2,
    /// Proximity trigger volume.
    Trigger = 3,
    /// Drawable sprite referencing an externally owned texture.
    Sprite = 4,
    /// Physics body participation.
    Body = 5,
    /// Player tag (mask-only).
    Player = 6,
}

impl ComponentKind {
    /// Number of component kinds.
    pub const COUNT: usize = 7;

    /// Every kind, in teardown order (hooks run in this order on destroy).
    pub const ALL: [Self; Self::COUNT] = [
        Self::Position,
        Self::Velocity,
        Self::Collider,
        Self::Trigger,
        Self::Sprite,
        Self::Body,
        Self::Player,
    ];

    /// The mask bit owned by this kind.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u64 {
        1 << self as u8
    }
}

/// Marker trait for stored components.
///
/// Components must be:
/// - `Copy` + `Pod` + `Zeroable`: bitwise-copyable plain old data
/// - `Default`: pre-allocation fills every cell with the default value
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// The kind (and therefore mask bit) this payload belongs to.
    const KIND: ComponentKind;
}

/// World-space position (2D).
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate in world units.
    pub x: f32,
    /// Y coordinate in world units.
    pub y: f32,
}

impl Component for Position {
    const KIND: ComponentKind = ComponentKind::Position;
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Movement intent in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X velocity component.
    pub x: f32,
    /// Y velocity component.
    pub y: f32,
}

impl Component for Velocity {
    const KIND: ComponentKind = ComponentKind::Velocity;
}

impl Velocity {
    /// Creates a new velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// AABB half-extents around the entity's position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Collider {
    /// Half-extent along X.
    pub hx: f32,
    /// Half-extent along Y.
    pub hy: f32,
}

impl Component for Collider {
    const KIND: ComponentKind = ComponentKind::Collider;
}

impl Collider {
    /// Creates a new collider from half-extents.
    #[inline]
    #[must_use]
    pub const fn new(hx: f32, hy: f32) -> Self {
        Self { hx, hy }
    }
}

/// Proximity trigger volume.
///
/// The owner's collider, padded by `pad`, is tested against every alive
/// entity whose mask contains all bits of `target_mask`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Trigger {
    /// Required component bits for candidate entities.
    pub target_mask: u64,
    /// Padding added to the owner's half-extents.
    pub pad: f32,
    /// Alignment filler.
    pub _pad: f32,
}

impl Component for Trigger {
    const KIND: ComponentKind = ComponentKind::Trigger;
}

impl Trigger {
    /// Creates a new trigger.
    #[inline]
    #[must_use]
    pub const fn new(pad: f32, target_mask: u64) -> Self {
        Self {
            target_mask,
            pad,
            _pad: 0.0,
        }
    }
}

/// Handle into an external texture store.
///
/// The kernel never inspects how the resource is stored; validity is the
/// store's call (`TextureStore::is_valid` at the runtime layer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct TexHandle {
    /// Store-assigned slot.
    pub id: u32,
    /// Store-assigned generation.
    pub generation: u32,
}

/// Sub-rectangle of a texture, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Creates a rectangle from position and size.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawable sprite referencing an externally ref-counted texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Sprite {
    /// Texture reference held on the entity's behalf.
    pub texture: TexHandle,
    /// Source rectangle within the texture.
    pub src: Rect,
    /// Draw origin offset X.
    pub origin_x: f32,
    /// Draw origin offset Y.
    pub origin_y: f32,
}

impl Component for Sprite {
    const KIND: ComponentKind = ComponentKind::Sprite;
}

/// Physics body participation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BodyKind {
    /// Moved by integration, collides with the world.
    #[default]
    Dynamic = 0,
    /// Moved by integration, ignores world resolution.
    Kinematic = 1,
    /// Never moved.
    Static = 2,
}

/// Physics body participation.
///
/// `created` stays 0 until the body-created hook materializes the derived
/// resource (fires once `Position | Collider | Body` are all present).
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Body {
    /// Mass in arbitrary units; 0 means immovable.
    pub mass: f32,
    /// Cached reciprocal of mass (0 for immovable bodies).
    pub inv_mass: f32,
    /// Body kind, stored as `BodyKind as u8`.
    pub kind: u8,
    /// Non-zero once the body-created hook has run for this occupancy.
    pub created: u8,
    /// Alignment filler.
    pub _pad: [u8; 2],
}

impl Component for Body {
    const KIND: ComponentKind = ComponentKind::Body;
}

impl Body {
    /// Creates a body of the given kind and mass, not yet materialized.
    #[inline]
    #[must_use]
    pub fn new(kind: BodyKind, mass: f32) -> Self {
        let inv_mass = if mass == 0.0 { 0.0 } else { 1.0 / mass };
        Self {
            mass,
            inv_mass,
            kind: kind as u8,
            created: 0,
            _pad: [0; 2],
        }
    }

    /// Returns the body kind.
    #[inline]
    #[must_use]
    pub fn body_kind(&self) -> BodyKind {
        match self.kind {
            1 => BodyKind::Kinematic,
            2 => BodyKind::Static,
            _ => BodyKind::Dynamic,
        }
    }

    /// Whether the body-created hook has run for this occupancy.
    #[inline]
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.created != 0
    }
}
