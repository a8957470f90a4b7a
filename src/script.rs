// SPDX-License-Identifier: GPL-3.0-only

//! Recorded input-method events.
//!
//! A script is a JSON array of the calls the input-method service makes into
//! [`KeyboardState`]. Replaying it yields the layout after every event, which
//! is how traces from a device are checked offline.
//!
//! ```json
//! [
//!     { "event": "load", "switch_back_symbols": "'" },
//!     { "event": "press", "code": "shift" },
//!     { "event": "release", "code": "shift" },
//!     { "event": "tap", "code": "a" }
//! ]
//! ```

use crate::input::KeyCode;
use crate::keyboard::{KeyboardState, LayoutId, StateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One call into the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Start a new keyboard session
    Load {
        #[serde(default)]
        switch_back_symbols: String,
        #[serde(default = "default_true")]
        distinct_multitouch: bool,
    },
    /// A key went down
    Press { code: KeyCode },
    /// A key went up
    Release {
        code: KeyCode,
        #[serde(default)]
        slid_off: bool,
    },
    /// A code was committed
    Input {
        code: KeyCode,
        #[serde(default = "default_true")]
        single: bool,
    },
    /// Long press or double tap of shift was recognized
    ToggleCapsLock,
    /// The auto-caps policy changed
    SetAutoCaps { enabled: bool },
    /// The service asks for automatic shift to be recomputed
    UpdateShiftState,
    /// An ordinary tap: press, single-key commit, release
    Tap { code: KeyCode },
}

fn default_true() -> bool {
    true
}

/// Layout observed after one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Position of the event in the script
    pub index: usize,
    pub event: Event,
    pub layout: LayoutId,
}

/// Error reading or replaying a script.
#[derive(Debug)]
pub enum ScriptError {
    /// The script is not a valid JSON event list
    Json(serde_json::Error),

    /// No layout could be read after the event at `index`
    State { index: usize, source: StateError },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Json(source) => {
                write!(f, "Invalid script at line {}: {}", source.line(), source)
            }
            ScriptError::State { index, source } => {
                write!(f, "Script event {} failed: {}", index, source)
            }
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Json(source) => Some(source),
            ScriptError::State { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Parses a script from a JSON string.
///
/// # Errors
///
/// Returns [`ScriptError::Json`] for malformed JSON, unknown events, or
/// unknown key names.
pub fn parse_script(json: &str) -> Result<Vec<Event>, ScriptError> {
    let events: Vec<Event> = serde_json::from_str(json)?;
    tracing::debug!("Parsed script with {} event(s)", events.len());
    Ok(events)
}

/// Applies one event to the state machine.
pub fn apply(state: &mut KeyboardState, event: &Event) {
    match event {
        Event::Load {
            switch_back_symbols,
            distinct_multitouch,
        } => state.load_keyboard(switch_back_symbols, *distinct_multitouch),
        Event::Press { code } => state.on_press_key(*code),
        Event::Release { code, slid_off } => state.on_release_key(*code, *slid_off),
        Event::Input { code, single } => state.on_code_input(*code, *single),
        Event::ToggleCapsLock => state.toggle_caps_lock(),
        Event::SetAutoCaps { enabled } => state.set_auto_caps_mode(*enabled),
        Event::UpdateShiftState => state.update_shift_state(),
        Event::Tap { code } => {
            state.on_press_key(*code);
            state.on_code_input(*code, true);
            state.on_release_key(*code, false);
        }
    }
}

/// Applies every event in order and records the layout after each.
///
/// # Errors
///
/// Returns [`ScriptError::State`] for the first event after which the
/// machine has no layout, i.e. events on a machine that was never loaded.
pub fn replay(state: &mut KeyboardState, events: &[Event]) -> Result<Vec<Step>, ScriptError> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            apply(state, event);
            let layout = state
                .layout_id()
                .map_err(|source| ScriptError::State { index, source })?;
            Ok(Step {
                index,
                event: event.clone(),
                layout,
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
