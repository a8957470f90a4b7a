// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard mode state machine.
//!
//! [`KeyboardState`] is owned by the input-method service and driven from its
//! input thread. Every inbound call is synchronous and total; the service
//! re-reads [`KeyboardState::layout_id`] afterwards to decide what to render.

use std::collections::HashSet;

use super::transitions;
use super::types::{KeyboardMode, LayoutId, ShiftMode, StateError, SymbolShiftMode};
use crate::config::KeyboardProfile;
use crate::input::{KeyCode, ModifierKeyState, PressState};

/// Tracks the alphabet/symbol mode, the shift mode, and the gestures on the
/// shift and symbol keys.
///
/// A new machine is unloaded: events are ignored and [`layout_id`] fails
/// until [`load_keyboard`] or [`load_profile`] is called. After loading, the
/// keyboard is in alphabet mode, unshifted.
///
/// [`layout_id`]: KeyboardState::layout_id
/// [`load_keyboard`]: KeyboardState::load_keyboard
/// [`load_profile`]: KeyboardState::load_profile
#[derive(Debug, Clone)]
pub struct KeyboardState {
    loaded: bool,

    mode: KeyboardMode,

    /// Alphabet shift mode to restore when leaving the symbol layout
    saved_alphabet_shift: ShiftMode,

    shift_key: ModifierKeyState,

    /// Alphabet shift mode right before the shift key went down
    shift_pressed_from: ShiftMode,

    symbol_key: ModifierKeyState,

    /// Characters that bring the keyboard back from symbols to the alphabet
    switch_back_symbols: HashSet<KeyCode>,

    /// Whether press and release of shift/symbol keys are reported separately
    distinct_multitouch: bool,

    /// Auto-caps policy supplied by the service
    auto_caps: bool,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    /// Creates an unloaded state machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: false,
            mode: KeyboardMode::default(),
            saved_alphabet_shift: ShiftMode::Normal,
            shift_key: ModifierKeyState::new("shift"),
            shift_pressed_from: ShiftMode::Normal,
            symbol_key: ModifierKeyState::new("symbol"),
            switch_back_symbols: HashSet::new(),
            distinct_multitouch: true,
            auto_caps: false,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Starts a new keyboard session.
    ///
    /// Resets to alphabet mode, unshifted, and forgets every gesture in
    /// progress. The auto-caps policy is kept.
    ///
    /// # Arguments
    ///
    /// * `switch_back_symbols` - Characters that snap the symbol layout back to
    ///                           the alphabet when typed
    /// * `distinct_multitouch` - Whether the device reports shift and symbol key
    ///                           press/release separately from other touches
    pub fn load_keyboard(&mut self, switch_back_symbols: &str, distinct_multitouch: bool) {
        self.switch_back_symbols = switch_back_symbols.chars().map(KeyCode::from).collect();
        self.distinct_multitouch = distinct_multitouch;
        self.mode = KeyboardMode::default();
        self.saved_alphabet_shift = ShiftMode::Normal;
        self.shift_pressed_from = ShiftMode::Normal;
        self.shift_key.reset();
        self.symbol_key.reset();
        self.loaded = true;

        tracing::debug!(
            "Keyboard loaded: {} switch-back symbol(s), distinct multitouch: {}",
            self.switch_back_symbols.len(),
            distinct_multitouch
        );
    }

    /// Starts a new keyboard session from a profile and applies its auto-caps
    /// policy.
    pub fn load_profile(&mut self, profile: &KeyboardProfile) {
        self.load_keyboard(&profile.switch_back_symbols, profile.distinct_multitouch);
        self.set_auto_caps_mode(profile.auto_caps);
        tracing::debug!("Applied keyboard profile '{}'", profile.name);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the layout to render.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotLoaded`] before the first load.
    pub fn layout_id(&self) -> Result<LayoutId, StateError> {
        if !self.loaded {
            return Err(StateError::NotLoaded);
        }
        Ok(self.mode.layout_id())
    }

    /// Returns the current mode. Before loading this is the initial mode.
    #[must_use]
    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn auto_caps_mode(&self) -> bool {
        self.auto_caps
    }

    #[must_use]
    pub fn has_distinct_multitouch(&self) -> bool {
        self.distinct_multitouch
    }

    #[must_use]
    pub fn shift_key_state(&self) -> PressState {
        self.shift_key.state()
    }

    #[must_use]
    pub fn symbol_key_state(&self) -> PressState {
        self.symbol_key.state()
    }

    /// Returns `true` if typing `code` in the symbol layout snaps back.
    #[must_use]
    pub fn is_switch_back_code(&self, code: KeyCode) -> bool {
        code.is_space_character() || self.switch_back_symbols.contains(&code)
    }

    // ========================================================================
    // Key Events
    // ========================================================================

    /// Handles a key going down.
    ///
    /// On devices with distinct multitouch, shift and the symbol key change
    /// the mode immediately. Any other key (and every key on other devices)
    /// turns a held shift or symbol key into a chord.
    pub fn on_press_key(&mut self, code: KeyCode) {
        if !self.ensure_loaded("key press") {
            return;
        }

        if self.distinct_multitouch && code == KeyCode::SHIFT {
            self.on_press_shift();
        } else if self.distinct_multitouch && code == KeyCode::SWITCH_ALPHA_SYMBOL {
            self.on_press_symbol();
        } else {
            self.on_other_key_pressed();
        }
    }

    /// Handles a key going up.
    ///
    /// A release with `slid_off` set never changes the mode; the key's
    /// momentary change is finished by the next single-key commit instead.
    pub fn on_release_key(&mut self, code: KeyCode, slid_off: bool) {
        if !self.ensure_loaded("key release") {
            return;
        }

        if self.distinct_multitouch && code == KeyCode::SHIFT {
            self.on_release_shift(slid_off);
        } else if self.distinct_multitouch && code == KeyCode::SWITCH_ALPHA_SYMBOL {
            self.on_release_symbol(slid_off);
        }
    }

    /// Handles a committed code.
    ///
    /// # Arguments
    ///
    /// * `code` - The committed key code
    /// * `single_key` - `true` if no shift or symbol key was held while the code
    ///                  committed; `false` for chorded input
    pub fn on_code_input(&mut self, code: KeyCode, single_key: bool) {
        if !self.ensure_loaded("code input") {
            return;
        }

        // Without distinct multitouch the commit is the only event the
        // shift and symbol keys produce.
        if !self.distinct_multitouch {
            if code == KeyCode::SHIFT {
                self.tap_shift();
                return;
            }
            if code == KeyCode::SWITCH_ALPHA_SYMBOL {
                self.toggle_alphabet_and_symbols("symbol key tapped");
                return;
            }
        }

        // Press and release already handled these.
        if code.is_tracked_modifier() || code == KeyCode::CAPSLOCK {
            return;
        }

        if !single_key {
            self.on_other_key_pressed();
            return;
        }

        if self.symbol_key.on_single_key_commit() {
            self.toggle_alphabet_and_symbols("slid off symbol key");
            return;
        }

        match self.mode {
            KeyboardMode::Symbols(shift) => {
                if self.shift_key.on_single_key_commit() {
                    self.set_mode(
                        KeyboardMode::Symbols(shift.toggled()),
                        "slid off symbol shift key",
                    );
                } else if self.is_switch_back_code(code) {
                    self.toggle_alphabet_and_symbols("switch-back code typed");
                }
            }
            KeyboardMode::Alphabet(shift) => {
                self.shift_key.on_single_key_commit();
                if code.is_letter() {
                    self.set_mode(
                        KeyboardMode::Alphabet(transitions::letter_committed(shift)),
                        "letter typed",
                    );
                }
            }
        }
    }

    // ========================================================================
    // Shift Policy
    // ========================================================================

    /// Toggles caps lock after the service recognized a long press or double
    /// tap of shift. Ignored in the symbol layout.
    pub fn toggle_caps_lock(&mut self) {
        if !self.ensure_loaded("caps lock toggle") {
            return;
        }

        match self.mode {
            KeyboardMode::Alphabet(shift) => self.set_mode(
                KeyboardMode::Alphabet(transitions::caps_lock_toggled(shift)),
                "caps lock toggled",
            ),
            KeyboardMode::Symbols(_) => {
                tracing::debug!("Ignoring caps lock toggle in symbol layout");
            }
        }
    }

    /// Stores the auto-caps policy consulted by [`update_shift_state`].
    ///
    /// May be called before loading.
    ///
    /// [`update_shift_state`]: KeyboardState::update_shift_state
    pub fn set_auto_caps_mode(&mut self, enabled: bool) {
        self.auto_caps = enabled;
    }

    /// Recomputes automatic shift from the auto-caps policy.
    ///
    /// Caps lock and manual shift are left alone. Calling this twice in a row
    /// is the same as calling it once.
    pub fn update_shift_state(&mut self) {
        if !self.ensure_loaded("shift state update") {
            return;
        }

        if let KeyboardMode::Alphabet(shift) = self.mode {
            self.set_mode(
                KeyboardMode::Alphabet(transitions::shift_state_updated(shift, self.auto_caps)),
                "shift state updated",
            );
        }
    }

    // ========================================================================
    // Internal Transitions
    // ========================================================================

    fn on_press_shift(&mut self) {
        match self.mode {
            KeyboardMode::Alphabet(shift) => {
                self.shift_pressed_from = shift;
                self.set_mode(
                    KeyboardMode::Alphabet(transitions::shift_pressed(shift)),
                    "shift pressed",
                );
            }
            KeyboardMode::Symbols(shift) => {
                self.set_mode(KeyboardMode::Symbols(shift.toggled()), "symbol shift pressed");
            }
        }
        self.shift_key.on_press();
    }

    fn on_release_shift(&mut self, slid_off: bool) {
        let previous = self.shift_key.on_release(slid_off);
        if slid_off || !matches!(previous, PressState::Pressed | PressState::Chording) {
            return;
        }
        let chorded = previous == PressState::Chording;

        match self.mode {
            KeyboardMode::Alphabet(shift) => {
                let next = transitions::shift_released(shift, self.shift_pressed_from, chorded);
                self.set_mode(KeyboardMode::Alphabet(next), "shift released");
            }
            KeyboardMode::Symbols(shift) if chorded => {
                self.set_mode(
                    KeyboardMode::Symbols(shift.toggled()),
                    "symbol shift chord released",
                );
            }
            KeyboardMode::Symbols(_) => {}
        }
    }

    fn on_press_symbol(&mut self) {
        self.toggle_alphabet_and_symbols("symbol key pressed");
        self.symbol_key.on_press();
    }

    fn on_release_symbol(&mut self, slid_off: bool) {
        let previous = self.symbol_key.on_release(slid_off);
        if !slid_off && previous == PressState::Chording {
            self.toggle_alphabet_and_symbols("symbol chord released");
        }
    }

    fn on_other_key_pressed(&mut self) {
        self.shift_key.on_other_key_pressed();
        self.symbol_key.on_other_key_pressed();
    }

    fn tap_shift(&mut self) {
        let next = match self.mode {
            KeyboardMode::Alphabet(shift) => KeyboardMode::Alphabet(transitions::shift_tapped(shift)),
            KeyboardMode::Symbols(shift) => KeyboardMode::Symbols(shift.toggled()),
        };
        self.set_mode(next, "shift tapped");
    }

    /// Switches between the alphabet and symbol layouts.
    ///
    /// Entering symbols always shows the first symbol page. Leaving symbols
    /// restores the remembered alphabet shift mode. Any shift gesture in
    /// progress belongs to the old layout and is dropped, as is a symbol key
    /// gesture that did not start this switch.
    fn toggle_alphabet_and_symbols(&mut self, reason: &str) {
        let next = match self.mode {
            KeyboardMode::Alphabet(shift) => {
                self.saved_alphabet_shift = transitions::remembered_for_symbols(shift);
                KeyboardMode::Symbols(SymbolShiftMode::Normal)
            }
            KeyboardMode::Symbols(_) => {
                let restored = self.saved_alphabet_shift;
                self.saved_alphabet_shift = ShiftMode::Normal;
                KeyboardMode::Alphabet(restored)
            }
        };
        tracing::debug!("{}: switching to {:?}", reason, next.alpha_symbol());
        self.set_mode(next, reason);
        self.shift_key.reset();
        self.symbol_key.reset();
    }

    fn set_mode(&mut self, next: KeyboardMode, reason: &str) {
        if self.mode != next {
            tracing::debug!("{}: {} -> {}", reason, self.mode, next);
            self.mode = next;
        }
    }

    fn ensure_loaded(&self, event: &str) -> bool {
        if !self.loaded {
            tracing::warn!("Ignoring {} before a keyboard was loaded", event);
        }
        self.loaded
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
