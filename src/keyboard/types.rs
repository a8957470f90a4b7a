// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for the keyboard mode state machine.
//!
//! The keyboard is always in exactly one [`KeyboardMode`]: the alphabet layout
//! with a [`ShiftMode`], or the symbol layout with a [`SymbolShiftMode`].
//! Each mode maps to one [`LayoutId`], which is what the service renders.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Mode Types
// ============================================================================

/// Which character set is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaSymbolMode {
    Alphabet,
    Symbols,
}

/// Shift state of the alphabet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    /// Lower case
    #[default]
    Normal,
    /// Upper case engaged with the shift key; released by the next letter
    ManualShifted,
    /// Upper case engaged by the auto-caps policy
    AutomaticShifted,
    /// Caps lock
    ShiftLocked,
    /// Caps lock with the shift key held down on top of it
    ShiftLockShifted,
}

impl ShiftMode {
    /// Returns `true` for the caps lock family.
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, ShiftMode::ShiftLocked | ShiftMode::ShiftLockShifted)
    }
}

/// Shift state of the symbol layout ("?123" versus "=\<").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolShiftMode {
    #[default]
    Normal,
    Shifted,
}

impl SymbolShiftMode {
    /// Returns the other symbol page.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SymbolShiftMode::Normal => SymbolShiftMode::Shifted,
            SymbolShiftMode::Shifted => SymbolShiftMode::Normal,
        }
    }
}

/// The complete keyboard mode.
///
/// Only the shift axis of the active layout exists, so an alphabet shift
/// mode can never be combined with the symbol layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "layout", content = "shift", rename_all = "snake_case")]
pub enum KeyboardMode {
    Alphabet(ShiftMode),
    Symbols(SymbolShiftMode),
}

impl Default for KeyboardMode {
    fn default() -> Self {
        KeyboardMode::Alphabet(ShiftMode::Normal)
    }
}

impl KeyboardMode {
    /// Returns the character set of this mode.
    #[must_use]
    pub fn alpha_symbol(self) -> AlphaSymbolMode {
        match self {
            KeyboardMode::Alphabet(_) => AlphaSymbolMode::Alphabet,
            KeyboardMode::Symbols(_) => AlphaSymbolMode::Symbols,
        }
    }

    /// Maps the mode to the layout the service should render.
    #[must_use]
    pub fn layout_id(self) -> LayoutId {
        match self {
            KeyboardMode::Alphabet(ShiftMode::Normal) => LayoutId::AlphabetUnshifted,
            KeyboardMode::Alphabet(ShiftMode::ManualShifted) => LayoutId::AlphabetManualShifted,
            KeyboardMode::Alphabet(ShiftMode::AutomaticShifted) => {
                LayoutId::AlphabetAutomaticShifted
            }
            KeyboardMode::Alphabet(ShiftMode::ShiftLocked) => LayoutId::AlphabetShiftLocked,
            KeyboardMode::Alphabet(ShiftMode::ShiftLockShifted) => {
                LayoutId::AlphabetShiftLockShifted
            }
            KeyboardMode::Symbols(SymbolShiftMode::Normal) => LayoutId::SymbolsUnshifted,
            KeyboardMode::Symbols(SymbolShiftMode::Shifted) => LayoutId::SymbolsShifted,
        }
    }
}

impl fmt::Display for KeyboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyboardMode::Alphabet(shift) => write!(f, "alphabet/{:?}", shift),
            KeyboardMode::Symbols(shift) => write!(f, "symbols/{:?}", shift),
        }
    }
}

// ============================================================================
// Layout Identifier
// ============================================================================

/// Identifier of the keyboard layout to render.
///
/// The numeric values are stable and may be stored by the service to key its
/// layout cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LayoutId {
    AlphabetUnshifted = 0,
    AlphabetManualShifted = 1,
    AlphabetAutomaticShifted = 2,
    AlphabetShiftLocked = 3,
    AlphabetShiftLockShifted = 4,
    SymbolsUnshifted = 5,
    SymbolsShifted = 6,
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutId::AlphabetUnshifted => "alphabet",
            LayoutId::AlphabetManualShifted => "alphabet_manual_shifted",
            LayoutId::AlphabetAutomaticShifted => "alphabet_automatic_shifted",
            LayoutId::AlphabetShiftLocked => "alphabet_shift_locked",
            LayoutId::AlphabetShiftLockShifted => "alphabet_shift_lock_shifted",
            LayoutId::SymbolsUnshifted => "symbols",
            LayoutId::SymbolsShifted => "symbols_shifted",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors reported by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The layout was queried before any keyboard was loaded.
    NotLoaded,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotLoaded => write!(
                f,
                "keyboard state queried before a keyboard was loaded\n  \
                 Suggestion: call load_keyboard() or load_profile() first"
            ),
        }
    }
}

impl std::error::Error for StateError {}

// ============================================================================
// Unit Tests
// ============================================================================
