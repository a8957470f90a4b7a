// SPDX-License-Identifier: GPL-3.0-only

//! kbmode - Keyboard mode state machine for on-screen keyboards
//!
//! This crate decides which layout an on-screen keyboard shows as the user
//! types: the alphabet (lower case, one-shot shift, automatic shift, caps
//! lock) or the symbols (two pages). It is driven by the input-method
//! service's key events and exposes the result as a [`keyboard::LayoutId`].
//!
//! # Modules
//!
//! - `app_settings`: Centralized application constants
//! - `config`: Keyboard profiles, built-in and from JSON files
//! - `input`: Key codes and press tracking of the shift and symbol keys
//! - `keyboard`: The state machine and its transitions
//! - `script`: Recorded event scripts and their replay

pub mod app_settings;
pub mod config;
pub mod input;
pub mod keyboard;
pub mod script;

// ============================================================================
// Integration Tests
// ============================================================================
