// SPDX-License-Identifier: GPL-3.0-only

//! Input vocabulary shared with the input-method service.
//!
//! # Features
//!
//! - **Key codes**: special negative codes for function keys, Unicode code
//!   points for characters, and a text parser for both
//! - **Key press tracking**: press, chording, and sliding state of the shift
//!   and symbol keys
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use kbmode::input::{parse_keycode, KeyCode};
//!
//! assert_eq!(parse_keycode("shift"), Some(KeyCode::SHIFT));
//! assert_eq!(parse_keycode("U+0027"), Some(KeyCode::from('\'')));
//! ```

// Sub-modules
pub mod key_state;
pub mod keycode;

// Re-export public API
pub use key_state::{ModifierKeyState, PressState};
pub use keycode::{parse_keycode, KeyCode, KeyCodeError};

// ============================================================================
// Module Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: Key codes used in profiles parse to the expected values
    ///
    /// Profiles list their switch-back symbols as plain characters; scripts name
    /// function keys. Both go through the same parser.
    #[test]
    fn test_profile_and_script_spellings() {
        let symbols: Vec<KeyCode> = "'\"".chars().map(KeyCode::from).collect();
        assert_eq!(symbols, vec![KeyCode(0x27), KeyCode(0x22)]);

        assert_eq!(
            parse_keycode("switch_alpha_symbol"),
            Some(KeyCode::SWITCH_ALPHA_SYMBOL)
        );
        assert_eq!("capslock".parse::<KeyCode>(), Ok(KeyCode::CAPSLOCK));
    }

    /// Test 2: Only shift and symbol keys are tracked modifiers
    ///
    /// Press tracking is created for exactly these two keys; every other code is
    /// an ordinary key.
    #[test]
    fn test_tracked_modifiers() {
        let tracked: Vec<KeyCode> = [
            KeyCode::SHIFT,
            KeyCode::SWITCH_ALPHA_SYMBOL,
            KeyCode::CAPSLOCK,
            KeyCode::DELETE,
            KeyCode::SPACE,
            KeyCode::from('a'),
        ]
        .into_iter()
        .filter(|code| code.is_tracked_modifier())
        .collect();

        assert_eq!(tracked, vec![KeyCode::SHIFT, KeyCode::SWITCH_ALPHA_SYMBOL]);

        let mut key = ModifierKeyState::new("shift");
        key.on_press();
        assert_eq!(key.state(), PressState::Pressed);
    }
}
