//! Data models for the mod manager.
//!
//! - [`Mod`]: one mod file found by a directory scan, with its [`ModState`]
//! - [`ModKind`]: the closed set of recognized mod file types
//! - [`Configuration`]: the persisted `config.json` record
//! - [`GameProfile`]: marker file and default/fallback locations for the target game
//!
//! Mods are never constructed on their own; they come out of
//! [`crate::services::registry::scan`] and are only valid until the next mutation.

pub mod config;
pub mod game;
pub mod mod_entry;

pub use config::Configuration;
pub use game::GameProfile;
pub use mod_entry::{DISABLED_SUFFIX, Mod, ModKind, ModState, toggled_name};
