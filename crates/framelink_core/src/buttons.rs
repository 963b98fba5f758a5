//! Held-button state shared between the input drain and the game step.
//!
//! The game reads a packed bitmask once per step; the main loop updates it
//! from drained events just before the step runs, so input observed within a
//! step is causally ordered before that step's effects.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::queue::{InputEvent, InputKey, InputKind};

/// D-pad up bit.
pub const BTN_UP: u8 = 0x80;
/// D-pad down bit.
pub const BTN_DOWN: u8 = 0x40;
/// D-pad left bit.
pub const BTN_LEFT: u8 = 0x20;
/// D-pad right bit.
pub const BTN_RIGHT: u8 = 0x10;
/// Secondary action bit.
pub const BTN_B: u8 = 0x08;
/// Primary action bit.
pub const BTN_A: u8 = 0x04;

/// Atomic held-button bitmask.
#[derive(Debug, Default)]
pub struct ButtonState {
    mask: AtomicU8,
}

impl ButtonState {
    /// Creates a state with no buttons held.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mask: AtomicU8::new(0),
        }
    }

    /// The button bit for a key, if the key maps to one.
    #[must_use]
    pub const fn bit(key: InputKey) -> u8 {
        match key {
            InputKey::Up => BTN_UP,
            InputKey::Down => BTN_DOWN,
            InputKey::Left => BTN_LEFT,
            InputKey::Right => BTN_RIGHT,
            InputKey::Ok => BTN_A,
            InputKey::Back => BTN_B,
        }
    }

    /// Folds one drained event into the mask.
    ///
    /// Press sets the bit, release clears it; a long press arrives while the
    /// key is still down, so it sets the bit too.
    pub fn apply(&self, event: InputEvent) {
        let bit = Self::bit(event.key);
        match event.kind {
            InputKind::Press | InputKind::LongPress => {
                self.mask.fetch_or(bit, Ordering::AcqRel);
            }
            InputKind::Release => {
                self.mask.fetch_and(!bit, Ordering::AcqRel);
            }
        }
    }

    /// Currently held buttons as a packed mask.
    #[must_use]
    pub fn pressed(&self) -> u8 {
        self.mask.load(Ordering::Acquire)
    }

    /// Whether every button in `mask` is held.
    #[must_use]
    pub fn all_pressed(&self, mask: u8) -> bool {
        self.pressed() & mask == mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_round_trip() {
        let state = ButtonState::new();
        assert_eq!(state.pressed(), 0);

        state.apply(InputEvent::new(InputKey::Up, InputKind::Press));
        state.apply(InputEvent::new(InputKey::Ok, InputKind::Press));
        assert_eq!(state.pressed(), BTN_UP | BTN_A);
        assert!(state.all_pressed(BTN_UP));
        assert!(!state.all_pressed(BTN_UP | BTN_B));

        state.apply(InputEvent::new(InputKey::Up, InputKind::Release));
        assert_eq!(state.pressed(), BTN_A);
    }

    #[test]
    fn test_long_press_keeps_bit_set() {
        let state = ButtonState::new();
        state.apply(InputEvent::new(InputKey::Back, InputKind::Press));
        state.apply(InputEvent::new(InputKey::Back, InputKind::LongPress));
        assert_eq!(state.pressed(), BTN_B);

        state.apply(InputEvent::new(InputKey::Back, InputKind::Release));
        assert_eq!(state.pressed(), 0);
    }
}
