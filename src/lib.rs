// Oblivion Mod Manager - mod library engine for Oblivion Remastered
//
// This is the library crate containing the engine (directory resolution, scanning,
// toggling, archive installation, removal) and a thin presentation layer.
// The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigStore;
pub use models::{Configuration, GameProfile, Mod, ModKind, ModState};
pub use services::{DirectoryPrompt, DirectoryResolver, ModDirectory};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
