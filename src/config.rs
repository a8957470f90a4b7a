// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard profiles.
//!
//! A profile carries the per-keyboard settings the state machine is loaded
//! with: the characters that snap the symbol layout back to the alphabet,
//! whether the device reports multitouch distinctly, and the initial
//! auto-caps policy. Profiles are JSON files; a few are built into the binary.
//!
//! ```json
//! {
//!     "name": "qwerty",
//!     "switch_back_symbols": "'",
//!     "distinct_multitouch": true,
//!     "auto_caps": true
//! }
//! ```

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Built-in profiles compiled into the binary.
#[derive(RustEmbed)]
#[folder = "resources/profiles/"]
struct BuiltinProfiles;

/// Settings a keyboard is loaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardProfile {
    /// Profile name, shown in logs and `--list-profiles`
    pub name: String,

    /// Characters that return the symbol layout to the alphabet when typed
    #[serde(default)]
    pub switch_back_symbols: String,

    /// Whether press and release of shift/symbol keys are reported separately
    #[serde(default = "default_distinct_multitouch")]
    pub distinct_multitouch: bool,

    /// Initial auto-caps policy
    #[serde(default)]
    pub auto_caps: bool,
}

fn default_distinct_multitouch() -> bool {
    true
}

// ============================================================================
// Errors
// ============================================================================

/// Error loading or validating a keyboard profile.
#[derive(Debug)]
pub enum ProfileError {
    /// I/O error occurred while reading a profile file
    IoError {
        source: std::io::Error,
        file_path: Option<String>,
        suggestion: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        source: serde_json::Error,
        file_path: Option<String>,
        /// Line number reported by serde_json
        line_number: Option<usize>,
        suggestion: Option<String>,
    },

    /// The profile parsed but its values are unusable
    Invalid {
        message: String,
        /// Offending field (e.g., "switch_back_symbols")
        field_path: String,
        suggestion: Option<String>,
    },

    /// Neither a profile file nor a built-in profile has this name
    NotFound {
        name: String,
        /// Names of the built-in profiles
        available: Vec<String>,
    },
}

impl ProfileError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON parsing error.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: None,
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Adds the file path to JSON errors that were created without one.
    #[must_use]
    pub fn with_path(self, path: &str) -> Self {
        match self {
            ProfileError::JsonError {
                source,
                file_path: None,
                line_number,
                suggestion,
            } => ProfileError::JsonError {
                source,
                file_path: Some(path.to_string()),
                line_number,
                suggestion,
            },
            other => other,
        }
    }

    /// Creates a validation error for one field.
    pub fn invalid(
        message: impl Into<String>,
        field_path: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            message: message.into(),
            field_path: field_path.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::IoError {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading profile '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ProfileError::JsonError {
                source,
                file_path,
                line_number,
                suggestion,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in profile '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ProfileError::Invalid {
                message,
                field_path,
                suggestion,
            } => {
                write!(f, "Invalid profile at '{}': {}", field_path, message)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ProfileError::NotFound { name, available } => {
                write!(f, "Profile '{}' not found", name)?;
                write!(
                    f,
                    "\n  Suggestion: Pass a profile file path or one of: {}",
                    available.join(", ")
                )?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::IoError { source, .. } => Some(source),
            ProfileError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses and validates a profile from a JSON string.
///
/// Repeated switch-back characters are logged and dropped.
///
/// # Errors
///
/// Returns `JsonError` for malformed JSON and `Invalid` if the profile name
/// is empty or the switch-back symbols contain a space character.
pub fn parse_profile_from_string(json: &str) -> Result<KeyboardProfile, ProfileError> {
    let profile: KeyboardProfile = serde_json::from_str(json)?;
    validate_profile(profile)
}

/// Parses and validates a profile from a JSON file.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read, otherwise the errors of
/// [`parse_profile_from_string`] with the file path attached.
pub fn load_profile_file(path: &str) -> Result<KeyboardProfile, ProfileError> {
    let json_str =
        fs::read_to_string(path).map_err(|e| ProfileError::io_error_with_path(e, path))?;

    let profile = parse_profile_from_string(&json_str).map_err(|e| e.with_path(path))?;
    tracing::debug!("Loaded profile '{}' from {}", profile.name, path);
    Ok(profile)
}

fn validate_profile(mut profile: KeyboardProfile) -> Result<KeyboardProfile, ProfileError> {
    if profile.name.trim().is_empty() {
        return Err(ProfileError::invalid(
            "Profile name is empty",
            "name",
            "Provide a short name such as \"qwerty\"",
        ));
    }

    if let Some(c) = profile.switch_back_symbols.chars().find(|c| *c == ' ' || *c == '\n') {
        return Err(ProfileError::invalid(
            format!("Switch-back symbols contain {:?}", c),
            "switch_back_symbols",
            "Remove it; space and enter always return to the alphabet",
        ));
    }

    let mut seen = HashSet::new();
    let mut unique = String::with_capacity(profile.switch_back_symbols.len());
    for c in profile.switch_back_symbols.chars() {
        if seen.insert(c) {
            unique.push(c);
        } else {
            tracing::warn!(
                "Profile '{}': switch-back symbol {:?} listed more than once",
                profile.name,
                c
            );
        }
    }
    profile.switch_back_symbols = unique;

    Ok(profile)
}

// ============================================================================
// Built-in Profiles
// ============================================================================

/// Returns the names of the built-in profiles, sorted.
#[must_use]
pub fn builtin_profile_names() -> Vec<String> {
    let mut names: Vec<String> = BuiltinProfiles::iter()
        .filter_map(|file| file.strip_suffix(".json").map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Loads a built-in profile by name.
///
/// # Returns
///
/// `None` if no built-in profile has this name
///
/// # Errors
///
/// Returns the parse errors of [`parse_profile_from_string`] if the embedded
/// file is broken.
pub fn builtin_profile(name: &str) -> Result<Option<KeyboardProfile>, ProfileError> {
    let file_name = format!("{}.json", name);
    let Some(file) = BuiltinProfiles::get(&file_name) else {
        return Ok(None);
    };

    let json = String::from_utf8_lossy(&file.data);
    parse_profile_from_string(&json)
        .map(Some)
        .map_err(|e| e.with_path(&file_name))
}

/// Resolves a profile given on the command line.
///
/// A path to an existing file is loaded from disk; anything else is looked
/// up among the built-in profiles.
///
/// # Errors
///
/// Returns `NotFound` if `name_or_path` is neither a file nor a built-in
/// profile name, or any error from loading the profile.
pub fn resolve_profile(name_or_path: &str) -> Result<KeyboardProfile, ProfileError> {
    if Path::new(name_or_path).is_file() {
        return load_profile_file(name_or_path);
    }

    builtin_profile(name_or_path)?.ok_or_else(|| ProfileError::NotFound {
        name: name_or_path.to_string(),
        available: builtin_profile_names(),
    })
}

// ============================================================================
// Tests
// ============================================================================
