// SPDX-License-Identifier: GPL-3.0-only

//! Press tracking for the modifier-like keys of the on-screen keyboard.
//!
//! The shift key and the alphabet/symbol switch key change the keyboard mode
//! when pressed. What happens when they are released depends on how they were
//! used in between:
//!
//! - **Pressed**: held down, nothing else happened yet
//! - **Chording**: held down while at least one other key was tapped
//! - **Sliding**: the finger slid off onto another key instead of lifting
//! - **Released**: not involved in any gesture
//!
//! # Example
//!
//! ```rust,ignore
//! use kbmode::input::{ModifierKeyState, PressState};
//!
//! let mut shift = ModifierKeyState::new("shift");
//! shift.on_press();
//! shift.on_other_key_pressed();
//! assert_eq!(shift.state(), PressState::Chording);
//! ```

use serde::Serialize;

/// Press state of a tracked key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PressState {
    /// Not pressed
    #[default]
    Released,
    /// Held down, no other key involved yet
    Pressed,
    /// Held down while other keys were tapped
    Chording,
    /// Slid off onto another key; waiting for that key's commit
    Sliding,
}

/// Tracks the press state of a single modifier-like key.
#[derive(Debug, Clone)]
pub struct ModifierKeyState {
    /// Key name used in log output
    name: &'static str,

    state: PressState,
}

impl ModifierKeyState {
    /// Creates a released key tracker.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: PressState::Released,
        }
    }

    /// Returns the current press state.
    #[must_use]
    pub fn state(&self) -> PressState {
        self.state
    }

    /// Marks the key as pressed.
    pub fn on_press(&mut self) {
        self.set(PressState::Pressed);
    }

    /// Records that another key went down while this one is held.
    ///
    /// A held key becomes chording; in any other state this is a no-op.
    pub fn on_other_key_pressed(&mut self) {
        if self.state == PressState::Pressed {
            self.set(PressState::Chording);
        }
    }

    /// Marks the key as released.
    ///
    /// # Arguments
    ///
    /// * `slid_off` - `true` if the finger slid off the key instead of lifting.
    ///                A held key then moves to `Sliding` so the next commit can
    ///                finish the gesture.
    ///
    /// # Returns
    ///
    /// The press state the key had before this release
    pub fn on_release(&mut self, slid_off: bool) -> PressState {
        let previous = self.state;
        let next = match (previous, slid_off) {
            (PressState::Pressed | PressState::Chording, true) => PressState::Sliding,
            _ => PressState::Released,
        };
        self.set(next);
        previous
    }

    /// Ends a momentary press when another key commits as a single key.
    ///
    /// A single-key commit means no tracked key is held anymore, so a key still
    /// marked pressed was slid off without a release event. Chording keys are
    /// left alone.
    ///
    /// # Returns
    ///
    /// `true` if the key was pressed or sliding, i.e. its momentary mode change
    /// is now finished
    pub fn on_single_key_commit(&mut self) -> bool {
        match self.state {
            PressState::Pressed | PressState::Sliding => {
                self.set(PressState::Released);
                true
            }
            PressState::Released | PressState::Chording => false,
        }
    }

    /// Forgets any gesture in progress.
    pub fn reset(&mut self) {
        self.state = PressState::Released;
    }

    fn set(&mut self, next: PressState) {
        if self.state != next {
            tracing::trace!("{} key: {:?} -> {:?}", self.name, self.state, next);
            self.state = next;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test the plain tap path: press then release
    #[test]
    fn test_press_release() {
        let mut key = ModifierKeyState::new("shift");
        assert_eq!(key.state(), PressState::Released);

        key.on_press();
        assert_eq!(key.state(), PressState::Pressed);

        let previous = key.on_release(false);
        assert_eq!(previous, PressState::Pressed);
        assert_eq!(key.state(), PressState::Released);
    }

    /// Test chording while held
    #[test]
    fn test_chording() {
        let mut key = ModifierKeyState::new("shift");
        key.on_press();
        key.on_other_key_pressed();
        assert_eq!(key.state(), PressState::Chording);

        // More keys keep it chording
        key.on_other_key_pressed();
        assert_eq!(key.state(), PressState::Chording);

        assert_eq!(key.on_release(false), PressState::Chording);
        assert_eq!(key.state(), PressState::Released);
    }

    /// Test that other keys do not start a chord on a released key
    #[test]
    fn test_other_key_on_released_key() {
        let mut key = ModifierKeyState::new("symbol");
        key.on_other_key_pressed();
        assert_eq!(key.state(), PressState::Released);
    }

    /// Test sliding off and consuming the slide
    #[test]
    fn test_sliding() {
        let mut key = ModifierKeyState::new("symbol");
        key.on_press();
        assert_eq!(key.on_release(true), PressState::Pressed);
        assert_eq!(key.state(), PressState::Sliding);

        // The key slid onto goes down; the slide is not a chord
        key.on_other_key_pressed();
        assert_eq!(key.state(), PressState::Sliding);

        assert!(key.on_single_key_commit());
        assert_eq!(key.state(), PressState::Released);
        assert!(!key.on_single_key_commit(), "Nothing left to finish");
    }

    /// Test that a single-key commit ends a press but not a chord
    #[test]
    fn test_single_key_commit() {
        let mut key = ModifierKeyState::new("shift");
        key.on_press();
        assert!(key.on_single_key_commit());
        assert_eq!(key.state(), PressState::Released);

        key.on_press();
        key.on_other_key_pressed();
        assert!(!key.on_single_key_commit());
        assert_eq!(key.state(), PressState::Chording);
    }

    /// Test that a slid release of a released key stays released
    #[test]
    fn test_slid_release_when_not_held() {
        let mut key = ModifierKeyState::new("shift");
        key.on_release(true);
        assert_eq!(key.state(), PressState::Released);
    }

    /// Test reset from every state
    #[test]
    fn test_reset() {
        let mut key = ModifierKeyState::new("shift");
        key.on_press();
        key.on_other_key_pressed();
        key.reset();
        assert_eq!(key.state(), PressState::Released);
    }
}
