// UI module - presentation layer over the engine
//
// This module contains:
// - Controller: owns the active mod directory and routes user actions to services
// - NativeDialogs: rfd-backed folder picker implementing DirectoryPrompt
// - Dialog helpers for delete confirmation and archive selection

pub mod controller;
pub mod dialogs;

pub use controller::{Controller, Listing, Notice, NoticeLevel, render_listing};
pub use dialogs::{NativeDialogs, confirm_delete, pick_archive};
