// SPDX-License-Identifier: GPL-3.0-only

//! Key codes exchanged between the input-method service and the state machine.
//!
//! Characters are carried as their Unicode code point. Function keys that do
//! not produce text (shift, the alphabet/symbol switch, caps lock, ...) use
//! negative codes so they can never collide with a character.
//!
//! # Text Formats
//!
//! Profiles and event scripts spell key codes as text. [`parse_keycode`]
//! accepts three formats:
//!
//! 1. **Named codes**: `"shift"`, `"switch_alpha_symbol"`, `"space"`, ...
//! 2. **Unicode codepoints**: `"U+0027"` (apostrophe), `"U+03C0"` (pi)
//! 3. **Single characters**: `"a"`, `"1"`, `"'"`
//!
//! Named codes are matched before single characters, so the text `"space"`
//! is the space bar while `" "` is the same code spelled as a character.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key code as delivered by the input-method service.
///
/// Out-of-range and unrecognized values are legal: the state machine treats
/// them as ordinary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// The shift key.
    pub const SHIFT: KeyCode = KeyCode(-1);
    /// The key switching between the alphabet and symbol layouts ("?123" / "ABC").
    pub const SWITCH_ALPHA_SYMBOL: KeyCode = KeyCode(-2);
    /// Caps lock, emitted once a long press or double tap of shift is recognized.
    pub const CAPSLOCK: KeyCode = KeyCode(-3);
    /// A key that commits a whole string instead of a single character.
    pub const OUTPUT_TEXT: KeyCode = KeyCode(-4);
    pub const DELETE: KeyCode = KeyCode(-5);
    pub const SETTINGS: KeyCode = KeyCode(-6);
    pub const SHORTCUT: KeyCode = KeyCode(-7);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0A);
    pub const SPACE: KeyCode = KeyCode(0x20);

    /// Returns `true` for codes that produce text and therefore consume a
    /// one-shot shift.
    #[must_use]
    pub fn is_letter(self) -> bool {
        self.0 >= Self::TAB.0
    }

    /// Returns `true` for space and enter.
    #[must_use]
    pub fn is_space_character(self) -> bool {
        self == Self::SPACE || self == Self::ENTER
    }

    /// Returns `true` for the two keys whose press state is tracked.
    #[must_use]
    pub fn is_tracked_modifier(self) -> bool {
        self == Self::SHIFT || self == Self::SWITCH_ALPHA_SYMBOL
    }

    /// Returns the character for this code, if it is a valid Unicode scalar.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        u32::try_from(self.0).ok().and_then(char::from_u32)
    }

    fn name(self) -> Option<&'static str> {
        NAMED_CODES
            .iter()
            .find(|(_, code)| *code == self)
            .map(|(name, _)| *name)
    }
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        // Every char is at most 0x10FFFF, which fits in an i32.
        KeyCode(c as i32)
    }
}

/// Canonical names, in the order `Display` prefers them.
const NAMED_CODES: &[(&str, KeyCode)] = &[
    ("shift", KeyCode::SHIFT),
    ("switch_alpha_symbol", KeyCode::SWITCH_ALPHA_SYMBOL),
    ("capslock", KeyCode::CAPSLOCK),
    ("output_text", KeyCode::OUTPUT_TEXT),
    ("delete", KeyCode::DELETE),
    ("settings", KeyCode::SETTINGS),
    ("shortcut", KeyCode::SHORTCUT),
    ("tab", KeyCode::TAB),
    ("enter", KeyCode::ENTER),
    ("space", KeyCode::SPACE),
];

/// Aliases accepted by the parser but never produced by `Display`.
const ALIASES: &[(&str, KeyCode)] = &[
    ("symbol", KeyCode::SWITCH_ALPHA_SYMBOL),
    ("caps_lock", KeyCode::CAPSLOCK),
    ("backspace", KeyCode::DELETE),
    ("return", KeyCode::ENTER),
];

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.as_char() {
            Some(c) if !c.is_control() && !c.is_whitespace() => write!(f, "{}", c),
            Some(c) => write!(f, "U+{:04X}", c as u32),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Error returned when text cannot be read as a key code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodeError {
    /// The text that failed to parse
    pub input: String,
}

impl fmt::Display for KeyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized key code '{}'\n  Suggestion: use a key name such as 'shift', \
             a single character, or a codepoint like 'U+0027'",
            self.input
        )
    }
}

impl std::error::Error for KeyCodeError {}

impl TryFrom<String> for KeyCode {
    type Error = KeyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_keycode(&value).ok_or(KeyCodeError { input: value })
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        code.to_string()
    }
}

impl std::str::FromStr for KeyCode {
    type Err = KeyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keycode(s).ok_or_else(|| KeyCodeError {
            input: s.to_string(),
        })
    }
}

/// Parses a key code from its text form.
///
/// Format detection priority:
/// 1. Named code (case-insensitive)
/// 2. Unicode codepoint: starts with "U+" or "u+" followed by hex digits
/// 3. Exactly one character
/// 4. A raw decimal code such as `"-7"`, as written by `Display` for values
///    that are neither named nor valid characters
///
/// Returns `None` for empty or unrecognized text.
pub fn parse_keycode(s: &str) -> Option<KeyCode> {
    if s.is_empty() {
        return None;
    }

    let lowered = s.to_ascii_lowercase();
    if let Some((_, code)) = NAMED_CODES
        .iter()
        .chain(ALIASES.iter())
        .find(|(name, _)| *name == lowered)
    {
        return Some(*code);
    }

    if let Some(stripped) = s.strip_prefix("U+").or_else(|| s.strip_prefix("u+")) {
        return parse_unicode_codepoint(stripped);
    }

    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::from(c));
    }

    s.parse::<i32>().ok().map(KeyCode)
}

/// Parses a Unicode codepoint from a hex string.
///
/// Returns `None` if the hex string is empty or invalid, above 0x10FFFF, or
/// in the surrogate range.
fn parse_unicode_codepoint(hex_str: &str) -> Option<KeyCode> {
    if hex_str.is_empty() {
        return None;
    }

    let codepoint = u32::from_str_radix(hex_str, 16).ok()?;
    char::from_u32(codepoint).map(KeyCode::from)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test named codes, including aliases and case folding
    #[test]
    fn test_parse_named_codes() {
        assert_eq!(parse_keycode("shift"), Some(KeyCode::SHIFT));
        assert_eq!(parse_keycode("Shift"), Some(KeyCode::SHIFT));
        assert_eq!(parse_keycode("symbol"), Some(KeyCode::SWITCH_ALPHA_SYMBOL));
        assert_eq!(parse_keycode("CAPSLOCK"), Some(KeyCode::CAPSLOCK));
        assert_eq!(parse_keycode("space"), Some(KeyCode::SPACE));
        assert_eq!(parse_keycode("return"), Some(KeyCode::ENTER));
    }

    /// Test single characters
    #[test]
    fn test_parse_single_characters() {
        assert_eq!(parse_keycode("a"), Some(KeyCode('a' as i32)));
        assert_eq!(parse_keycode("'"), Some(KeyCode(0x27)));
        assert_eq!(parse_keycode(" "), Some(KeyCode::SPACE));
        assert_eq!(parse_keycode("é"), Some(KeyCode(0xE9)));
    }

    /// Test Unicode codepoints with both prefixes
    #[test]
    fn test_parse_unicode_codepoints() {
        assert_eq!(parse_keycode("U+0027"), Some(KeyCode(0x27)));
        assert_eq!(parse_keycode("u+03c0"), Some(KeyCode(0x03C0)));
        assert_eq!(parse_keycode("U+10FFFF"), Some(KeyCode(0x10FFFF)));
    }

    /// Test that malformed text is rejected
    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_keycode(""), None);
        assert_eq!(parse_keycode("U+"), None);
        assert_eq!(parse_keycode("U+ZZZZ"), None);
        assert_eq!(parse_keycode("U+D800"), None, "Surrogates are not characters");
        assert_eq!(parse_keycode("U+110000"), None);
        assert_eq!(parse_keycode("not_a_key"), None);
    }

    /// Test that Display output parses back to the same code
    #[test]
    fn test_display_parses_back() {
        for code in [
            KeyCode::SHIFT,
            KeyCode::SWITCH_ALPHA_SYMBOL,
            KeyCode::SPACE,
            KeyCode::ENTER,
            KeyCode('Z' as i32),
            KeyCode(0x00A0),
            KeyCode(-42),
        ] {
            let text = code.to_string();
            assert_eq!(parse_keycode(&text), Some(code), "'{}' should parse back", text);
        }
    }

    /// Test classification predicates
    #[test]
    fn test_predicates() {
        assert!(KeyCode('z' as i32).is_letter());
        assert!(KeyCode::SPACE.is_letter());
        assert!(!KeyCode::SHIFT.is_letter());
        assert!(!KeyCode::CAPSLOCK.is_letter());

        assert!(KeyCode::SPACE.is_space_character());
        assert!(KeyCode::ENTER.is_space_character());
        assert!(!KeyCode::TAB.is_space_character());

        assert!(KeyCode::SHIFT.is_tracked_modifier());
        assert!(KeyCode::SWITCH_ALPHA_SYMBOL.is_tracked_modifier());
        assert!(!KeyCode::CAPSLOCK.is_tracked_modifier());
    }

    /// Test serde uses the text form
    #[test]
    fn test_serde_text_form() {
        let json = serde_json::to_string(&KeyCode::SHIFT).unwrap();
        assert_eq!(json, "\"shift\"");

        let code: KeyCode = serde_json::from_str("\"U+0027\"").unwrap();
        assert_eq!(code, KeyCode(0x27));

        let err = serde_json::from_str::<KeyCode>("\"bogus\"");
        assert!(err.is_err());
    }
}
