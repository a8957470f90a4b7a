// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard mode state machine.
//!
//! This module decides which layout an on-screen keyboard shows: the alphabet
//! (unshifted, shifted, caps locked) or the symbols (two pages). It consumes
//! the key events of the input-method service and produces a [`LayoutId`].
//!
//! # Features
//!
//! - **One-shot shift**: tapping shift upper-cases the next letter only
//! - **Chording**: holding shift or the symbol key while typing keeps the
//!   mode until the key is released
//! - **Sliding**: sliding from shift or the symbol key onto another key
//!   applies the mode to that key only
//! - **Caps lock**: toggled by a long press or double tap recognized upstream
//! - **Auto caps**: automatic shift driven by the service's policy
//! - **Snap back**: typing space or a configured symbol returns from the
//!   symbol layout to the alphabet
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use kbmode::input::KeyCode;
//! use kbmode::keyboard::{KeyboardState, LayoutId};
//!
//! let mut state = KeyboardState::new();
//! state.load_keyboard("'", true);
//!
//! // Tap shift, then a letter
//! state.on_press_key(KeyCode::SHIFT);
//! state.on_code_input(KeyCode::SHIFT, true);
//! state.on_release_key(KeyCode::SHIFT, false);
//! assert_eq!(state.layout_id(), Ok(LayoutId::AlphabetManualShifted));
//!
//! state.on_press_key(KeyCode::from('Q'));
//! state.on_code_input(KeyCode::from('Q'), true);
//! state.on_release_key(KeyCode::from('Q'), false);
//! assert_eq!(state.layout_id(), Ok(LayoutId::AlphabetUnshifted));
//! ```

// Sub-modules
pub mod state;
pub mod transitions;
pub mod types;

// Re-export public API
pub use state::KeyboardState;
pub use types::{AlphaSymbolMode, KeyboardMode, LayoutId, ShiftMode, StateError, SymbolShiftMode};

// ============================================================================
// Scenario Tests
// ============================================================================
