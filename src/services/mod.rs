//! Services module - the mod library engine.
//!
//! Everything here is synchronous, takes the mod directory as an explicit
//! argument and holds no session state. The presentation layer owns the
//! active [`ModDirectory`] and re-runs [`registry::scan`] after every mutation.
//!
//! # Components
//!
//! - [`DirectoryResolver`]: picks the active mod directory from saved config,
//!   platform defaults, or a [`DirectoryPrompt`], validating against the
//!   game's marker file
//! - [`registry::scan`]: lists the recognized mod files in a directory
//! - [`toggle::toggle`]: enables/disables a mod by renaming `X.esp` <-> `X.esp.bak`
//! - [`installer::install`]: extracts a `.zip`/`.7z` archive into the directory
//! - [`removal::delete`]: removes a mod file or folder
//!
//! # Errors
//!
//! Each operation has its own error enum so callers can tell filesystem
//! failures ([`ToggleError`], [`DeleteError`]) from archive problems
//! ([`InstallError::Corrupt`], [`InstallError::UnsupportedFormat`]).
//! None of them are fatal; the caller re-scans to observe the real state.

pub mod directory;
pub mod installer;
pub mod registry;
pub mod removal;
pub mod toggle;

pub use directory::{DirectoryPrompt, DirectoryResolver, ModDirectory};
pub use installer::{ArchiveFormat, InstallError, InstallReport, install};
pub use registry::{RegistryError, scan};
pub use removal::{DeleteError, delete};
pub use toggle::{ToggleError, toggle, toggle_by_name};
