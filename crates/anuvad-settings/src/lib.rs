//! # anuvad-settings
//!
//! Configuration management with layered sources for the anuvad relay.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`AnuvadSettings::default()`]
//! 2. **User file**: `~/.anuvad/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `ANUVAD_*` overrides (highest priority)
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Usage
//!
//! ```no_run
//! use anuvad_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("listening on {}:{}", settings.server.host, settings.server.port);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_env_overrides_from, deep_merge, load_settings,
    load_settings_from_path, settings_path,
};
pub use types::*;
