// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Binary name, also used as the tracing target prefix.
pub const APP_NAME: &str = "kbmode";

/// Default log directive added on top of `RUST_LOG`.
pub const LOG_DIRECTIVE: &str = "kbmode=info";

/// Profile used when `--profile` is not given.
pub const DEFAULT_PROFILE: &str = "qwerty";
