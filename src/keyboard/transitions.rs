// SPDX-License-Identifier: GPL-3.0-only

//! Pure shift transitions of the alphabet layout.
//!
//! Each function maps the current [`ShiftMode`] and the facts of one event to
//! the next shift mode. [`KeyboardState`](super::KeyboardState) decides which
//! function applies; nothing here reads or writes machine state.

use super::types::ShiftMode;

/// Shift key goes down.
///
/// Any unlocked mode becomes manually shifted. Pressing shift during caps
/// lock shows the lock-shifted layout; the release decides whether the lock
/// survives.
#[must_use]
pub fn shift_pressed(current: ShiftMode) -> ShiftMode {
    match current {
        ShiftMode::Normal | ShiftMode::AutomaticShifted | ShiftMode::ManualShifted => {
            ShiftMode::ManualShifted
        }
        ShiftMode::ShiftLocked | ShiftMode::ShiftLockShifted => ShiftMode::ShiftLockShifted,
    }
}

/// Shift key lifts cleanly (no slide).
///
/// # Arguments
///
/// * `current` - Shift mode right before the release
/// * `pressed_from` - Shift mode right before the matching press
/// * `chorded` - Whether other keys were tapped while shift was held
///
/// A plain tap from `Normal` latches a one-shot shift. A plain tap on an
/// already shifted keyboard (automatic, manual, or locked) clears it. After
/// chording, shift falls back to what it was under the chord. If caps lock
/// was toggled while shift was held, the toggled mode stands.
#[must_use]
pub fn shift_released(current: ShiftMode, pressed_from: ShiftMode, chorded: bool) -> ShiftMode {
    match current {
        ShiftMode::ManualShifted if chorded => ShiftMode::Normal,
        ShiftMode::ManualShifted => match pressed_from {
            ShiftMode::Normal => ShiftMode::ManualShifted,
            ShiftMode::AutomaticShifted
            | ShiftMode::ManualShifted
            | ShiftMode::ShiftLocked
            | ShiftMode::ShiftLockShifted => ShiftMode::Normal,
        },
        ShiftMode::ShiftLockShifted if chorded => ShiftMode::ShiftLocked,
        ShiftMode::ShiftLockShifted => ShiftMode::Normal,
        ShiftMode::Normal | ShiftMode::AutomaticShifted | ShiftMode::ShiftLocked => current,
    }
}

/// A letter committed by a single key while shift is not held.
///
/// One-shot shifts are consumed; caps lock is not.
#[must_use]
pub fn letter_committed(current: ShiftMode) -> ShiftMode {
    match current {
        ShiftMode::ManualShifted | ShiftMode::AutomaticShifted => ShiftMode::Normal,
        ShiftMode::ShiftLockShifted => ShiftMode::ShiftLocked,
        ShiftMode::Normal | ShiftMode::ShiftLocked => current,
    }
}

/// Caps lock toggled by a recognized long press or double tap.
#[must_use]
pub fn caps_lock_toggled(current: ShiftMode) -> ShiftMode {
    if current.is_locked() {
        ShiftMode::Normal
    } else {
        ShiftMode::ShiftLocked
    }
}

/// Shift recomputed from the auto-caps policy.
///
/// Idempotent: applying it to its own result with the same policy yields the
/// same mode.
#[must_use]
pub fn shift_state_updated(current: ShiftMode, auto_caps: bool) -> ShiftMode {
    match current {
        ShiftMode::Normal if auto_caps => ShiftMode::AutomaticShifted,
        ShiftMode::AutomaticShifted if !auto_caps => ShiftMode::Normal,
        _ => current,
    }
}

/// Shift committed as a whole tap, on devices that cannot report the shift
/// key's press and release separately.
#[must_use]
pub fn shift_tapped(current: ShiftMode) -> ShiftMode {
    match current {
        ShiftMode::Normal => ShiftMode::ManualShifted,
        ShiftMode::ManualShifted
        | ShiftMode::AutomaticShifted
        | ShiftMode::ShiftLocked
        | ShiftMode::ShiftLockShifted => ShiftMode::Normal,
    }
}

/// Alphabet shift mode restored when coming back from the symbol layout.
///
/// Automatic shift is advisory and is recomputed by the next update, so it is
/// not carried over. The held-shift overlay of caps lock is dropped.
#[must_use]
pub fn remembered_for_symbols(current: ShiftMode) -> ShiftMode {
    match current {
        ShiftMode::ShiftLocked | ShiftMode::ShiftLockShifted => ShiftMode::ShiftLocked,
        ShiftMode::ManualShifted => ShiftMode::ManualShifted,
        ShiftMode::Normal | ShiftMode::AutomaticShifted => ShiftMode::Normal,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ShiftMode; 5] = [
        ShiftMode::Normal,
        ShiftMode::ManualShifted,
        ShiftMode::AutomaticShifted,
        ShiftMode::ShiftLocked,
        ShiftMode::ShiftLockShifted,
    ];

    /// Test a plain shift tap from every mode
    #[test]
    fn test_tap_from_every_mode() {
        let tap = |from| shift_released(shift_pressed(from), from, false);

        assert_eq!(tap(ShiftMode::Normal), ShiftMode::ManualShifted);
        assert_eq!(tap(ShiftMode::ManualShifted), ShiftMode::Normal);
        assert_eq!(tap(ShiftMode::AutomaticShifted), ShiftMode::Normal);
        assert_eq!(tap(ShiftMode::ShiftLocked), ShiftMode::Normal);
    }

    /// Test a chorded shift from every mode
    #[test]
    fn test_chord_from_every_mode() {
        let chord = |from| shift_released(shift_pressed(from), from, true);

        assert_eq!(chord(ShiftMode::Normal), ShiftMode::Normal);
        assert_eq!(chord(ShiftMode::ManualShifted), ShiftMode::Normal);
        assert_eq!(chord(ShiftMode::AutomaticShifted), ShiftMode::Normal);
        assert_eq!(chord(ShiftMode::ShiftLocked), ShiftMode::ShiftLocked);
    }

    /// Test that caps lock toggled while shift is held survives the release
    #[test]
    fn test_caps_lock_toggled_while_held() {
        // Long press from lower case
        let held = caps_lock_toggled(shift_pressed(ShiftMode::Normal));
        assert_eq!(held, ShiftMode::ShiftLocked);
        assert_eq!(
            shift_released(held, ShiftMode::Normal, false),
            ShiftMode::ShiftLocked
        );

        // Long press from caps lock
        let held = caps_lock_toggled(shift_pressed(ShiftMode::ShiftLocked));
        assert_eq!(held, ShiftMode::Normal);
        assert_eq!(
            shift_released(held, ShiftMode::ShiftLocked, false),
            ShiftMode::Normal
        );
    }

    /// Test one-shot consumption by a letter
    #[test]
    fn test_letter_committed() {
        assert_eq!(letter_committed(ShiftMode::ManualShifted), ShiftMode::Normal);
        assert_eq!(letter_committed(ShiftMode::AutomaticShifted), ShiftMode::Normal);
        assert_eq!(
            letter_committed(ShiftMode::ShiftLockShifted),
            ShiftMode::ShiftLocked
        );
        assert_eq!(letter_committed(ShiftMode::ShiftLocked), ShiftMode::ShiftLocked);
        assert_eq!(letter_committed(ShiftMode::Normal), ShiftMode::Normal);
    }

    /// Test caps lock toggling in both directions
    #[test]
    fn test_caps_lock_toggled() {
        for mode in ALL {
            let toggled = caps_lock_toggled(mode);
            if mode.is_locked() {
                assert_eq!(toggled, ShiftMode::Normal);
            } else {
                assert_eq!(toggled, ShiftMode::ShiftLocked);
            }
        }
    }

    /// Test auto-caps update is idempotent for every mode and policy
    #[test]
    fn test_shift_state_updated_idempotent() {
        for mode in ALL {
            for auto_caps in [false, true] {
                let once = shift_state_updated(mode, auto_caps);
                assert_eq!(shift_state_updated(once, auto_caps), once);
            }
        }
        assert_eq!(
            shift_state_updated(ShiftMode::Normal, true),
            ShiftMode::AutomaticShifted
        );
        assert_eq!(
            shift_state_updated(ShiftMode::AutomaticShifted, false),
            ShiftMode::Normal
        );
        assert_eq!(
            shift_state_updated(ShiftMode::ManualShifted, false),
            ShiftMode::ManualShifted
        );
        assert_eq!(
            shift_state_updated(ShiftMode::ShiftLocked, true),
            ShiftMode::ShiftLocked
        );
    }

    /// Test whole-tap toggling on non-distinct multitouch devices
    #[test]
    fn test_shift_tapped() {
        assert_eq!(shift_tapped(ShiftMode::Normal), ShiftMode::ManualShifted);
        assert_eq!(shift_tapped(ShiftMode::ManualShifted), ShiftMode::Normal);
        assert_eq!(shift_tapped(ShiftMode::AutomaticShifted), ShiftMode::Normal);
        assert_eq!(shift_tapped(ShiftMode::ShiftLocked), ShiftMode::Normal);
    }

    /// Test which alphabet modes survive a trip through the symbol layout
    #[test]
    fn test_remembered_for_symbols() {
        assert_eq!(
            remembered_for_symbols(ShiftMode::ShiftLockShifted),
            ShiftMode::ShiftLocked
        );
        assert_eq!(
            remembered_for_symbols(ShiftMode::AutomaticShifted),
            ShiftMode::Normal
        );
        assert_eq!(
            remembered_for_symbols(ShiftMode::ManualShifted),
            ShiftMode::ManualShifted
        );
    }
}
