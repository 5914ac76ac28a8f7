//! # bayanihan-settings
//!
//! Configuration with layered sources for the Bayanihan volunteer hub.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`HubSettings::default()`]
//! 2. **User file**: `~/.bayanihan/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `BAYANIHAN_*` overrides (highest priority)
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Usage
//!
//! ```no_run
//! use bayanihan_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("users file: {}", settings.users_path().display());
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
