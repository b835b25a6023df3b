//! Per-frame input snapshot.
//!
//! The platform layer pumps its native event queue into one immutable
//! snapshot per frame; every simulation tick inside that frame sees the
//! same snapshot. Edge state (pressed/released) is relative to the
//! previous frame, not the previous tick.

/// Logical buttons the simulation understands.
///
/// The platform maps physical keys/pads to these; the runtime never sees
/// scancodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    /// Move up.
    Up = 0,
    /// Move down.
    Down = 1,
    /// Move left.
    Left = 2,
    /// Move right.
    Right = 3,
    /// Primary action.
    Action = 4,
    /// Cancel / menu.
    Cancel = 5,
}

impl Button {
    #[inline]
    const fn bit(self) -> u64 {
        1 << self as u8
    }
}

/// Immutable view of input for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    down: u64,
    pressed: u64,
    released: u64,
    /// Pointer position in window coordinates.
    pub pointer_x: f32,
    /// Pointer position in window coordinates.
    pub pointer_y: f32,
    /// Scroll wheel delta accumulated over the frame.
    pub wheel: f32,
}

impl InputSnapshot {
    /// Starts the next frame's snapshot from this one: held state carries
    /// over, edge state and wheel reset.
    #[must_use]
    pub fn next_frame(&self) -> Self {
        Self {
            down: self.down,
            pressed: 0,
            released: 0,
            pointer_x: self.pointer_x,
            pointer_y: self.pointer_y,
            wheel: 0.0,
        }
    }

    /// Records a button press event.
    pub fn press(&mut self, button: Button) {
        if self.down & button.bit() == 0 {
            self.pressed |= button.bit();
        }
        self.down |= button.bit();
    }

    /// Records a button release event.
    pub fn release(&mut self, button: Button) {
        if self.down & button.bit() != 0 {
            self.released |= button.bit();
        }
        self.down &= !button.bit();
    }

    /// Whether the button is currently held.
    #[inline]
    #[must_use]
    pub fn is_down(&self, button: Button) -> bool {
        self.down & button.bit() != 0
    }

    /// Whether the button went down this frame.
    #[inline]
    #[must_use]
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }

    /// Whether the button went up this frame.
    #[inline]
    #[must_use]
    pub fn was_released(&self, button: Button) -> bool {
        self.released & button.bit() != 0
    }

    /// Movement intent on X in [-1, 1], derived from held buttons.
    #[inline]
    #[must_use]
    pub fn move_x(&self) -> f32 {
        let mut x = 0.0;
        if self.is_down(Button::Right) {
            x += 1.0;
        }
        if self.is_down(Button::Left) {
            x -= 1.0;
        }
        x
    }

    /// Movement intent on Y in [-1, 1], derived from held buttons.
    #[inline]
    #[must_use]
    pub fn move_y(&self) -> f32 {
        let mut y = 0.0;
        if self.is_down(Button::Down) {
            y += 1.0;
        }
        if self.is_down(Button::Up) {
            y -= 1.0;
        }
        y
    }
}
