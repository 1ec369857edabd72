//! Per-tick input resources.
//!
//! The front-end (or a test) writes the raw held state of the three level
//! keys into [`RawInput`]. Once per tick the input sampler turns it into
//! [`InputState`], which also carries the press/release edges.
//!
//! The keyboard is read once per rendered frame while the level runs on a
//! fixed tick, so a frame can pass without any tick. A jump pressed during
//! such a frame is latched in [`RawInput`] until a tick consumes it.
use bevy_ecs::prelude::*;

/// Held state of the level keys as reported by the keyboard this tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    jump_latched: bool,
}

impl RawInput {
    /// Store one rendered frame of keyboard state.
    ///
    /// `jump_pressed` is the frame's press edge. It is kept until
    /// [`take_jump`](Self::take_jump) runs, even if the key is already up.
    pub fn record_frame(&mut self, left: bool, right: bool, jump_down: bool, jump_pressed: bool) {
        self.left = left;
        self.right = right;
        self.jump = jump_down;
        self.jump_latched |= jump_pressed;
    }

    /// Jump state for the current tick. Clears the latch.
    pub fn take_jump(&mut self) -> bool {
        let held = self.jump || self.jump_latched;
        self.jump_latched = false;
        held
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state with its edges for the current tick.
pub struct KeyState {
    /// Whether the key is held this tick.
    pub held: bool,
    /// Whether the key went down this tick.
    pub just_pressed: bool,
    /// Whether the key went up this tick.
    pub just_released: bool,
}

impl KeyState {
    /// Advance to the next tick with the newly sampled held state.
    pub fn advance(&mut self, held: bool) {
        self.just_pressed = held && !self.held;
        self.just_released = !held && self.held;
        self.held = held;
    }
}

/// Resource capturing the per-tick key state relevant to gameplay.
///
/// `jump` doubles as the confirm key on the game over and win screens.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: KeyState,
    pub right: KeyState,
    pub jump: KeyState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_fire_once_per_press() {
        let mut key = KeyState::default();
        key.advance(true);
        assert!(key.held && key.just_pressed && !key.just_released);
        key.advance(true);
        assert!(key.held && !key.just_pressed);
        key.advance(false);
        assert!(!key.held && key.just_released && !key.just_pressed);
        key.advance(false);
        assert_eq!(key, KeyState::default());
    }

    #[test]
    fn tap_between_ticks_is_latched() {
        let mut raw = RawInput::default();
        // Pressed and released inside frames that ran no tick
        raw.record_frame(false, false, false, true);
        raw.record_frame(false, false, false, false);

        let mut jump = KeyState::default();
        jump.advance(raw.take_jump());
        assert!(jump.just_pressed);
        jump.advance(raw.take_jump());
        assert!(jump.just_released);
        assert!(!raw.take_jump());
    }

    #[test]
    fn held_jump_does_not_need_the_latch() {
        let mut raw = RawInput::default();
        raw.record_frame(false, true, true, false);
        assert!(raw.right);
        assert!(raw.take_jump());
        assert!(raw.take_jump());
        raw.record_frame(false, true, false, false);
        assert!(!raw.take_jump());
    }
}
