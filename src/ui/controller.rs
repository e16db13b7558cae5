// Controller - Bridges user actions with the mod library engine
//
// This module contains the Controller which owns the session's active mod
// directory and routes each user action to the matching service, turning
// the result into a Notice for display. Every action is followed by a
// fresh scan on the caller's side; nothing is cached between actions.

use crate::models::Mod;
use crate::services::{self, DirectoryPrompt, DirectoryResolver, InstallError, ModDirectory};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt::Write as _;

/// Severity of a message shown to the user after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user describing an action's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Result of refreshing the listing.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub mods: Vec<Mod>,
    /// Set when the directory could not be listed; `mods` is empty then.
    pub warning: Option<Notice>,
}

/// Session controller: one active [`ModDirectory`], actions routed to services.
pub struct Controller {
    resolver: DirectoryResolver,
    directory: ModDirectory,
}

impl Controller {
    /// Resolve the startup directory (may prompt) and build the controller.
    pub fn start(resolver: DirectoryResolver, prompt: &mut dyn DirectoryPrompt) -> Self {
        let directory = resolver.resolve(prompt);
        Self::with_directory(resolver, directory)
    }

    pub fn with_directory(resolver: DirectoryResolver, directory: ModDirectory) -> Self {
        if !directory.is_resolved() {
            tracing::warn!("Running with unresolved mod directory {}", directory.path());
        }
        Self {
            resolver,
            directory,
        }
    }

    /// Use `path` for this session only, without saving it.
    pub fn with_override(resolver: DirectoryResolver, path: Utf8PathBuf) -> Self {
        let directory = if resolver.validate(&path) {
            ModDirectory::Resolved(path)
        } else {
            ModDirectory::Unresolved(path)
        };
        Self::with_directory(resolver, directory)
    }

    pub fn directory(&self) -> &ModDirectory {
        &self.directory
    }

    /// Re-scan the active directory.
    pub fn refresh(&self) -> Listing {
        match services::scan(self.directory.path()) {
            Ok(mods) => Listing {
                mods,
                warning: None,
            },
            Err(e) => Listing {
                mods: Vec::new(),
                warning: Some(Notice::warning(e.to_string())),
            },
        }
    }

    pub fn toggle(&self, name: &str) -> Notice {
        match services::toggle_by_name(self.directory.path(), name) {
            Ok(new_name) => Notice::info(format!("{} is now {}", name, new_name)),
            Err(e) => {
                tracing::error!("Toggle failed: {}", e);
                Notice::error(format!("Failed to toggle mod: {}", e))
            }
        }
    }

    pub fn install(&self, archive: &Utf8Path) -> Notice {
        match services::install(archive, self.directory.path()) {
            Ok(report) if report.entries_skipped > 0 => Notice::warning(format!(
                "Mod installed ({} files), {} unsafe entries skipped",
                report.files_written, report.entries_skipped
            )),
            Ok(report) => Notice::info(format!(
                "Mod installed successfully ({} files)",
                report.files_written
            )),
            Err(e) => {
                tracing::error!("Install failed: {}", e);
                let hint = match &e {
                    err if err.is_partial() => "Install incomplete, some files were written",
                    InstallError::Corrupt { .. } | InstallError::UnsupportedFormat(_) => {
                        "Archive rejected"
                    }
                    _ => "Failed to install mod",
                };
                Notice::error(format!("{}: {}", hint, e))
            }
        }
    }

    /// Delete `name` after `confirm` agrees. `None` if the user declined.
    pub fn delete(&self, name: &str, confirm: &mut dyn FnMut(&str) -> bool) -> Option<Notice> {
        if !confirm(name) {
            tracing::debug!("Delete of {} declined", name);
            return None;
        }

        Some(match services::delete(self.directory.path(), name) {
            Ok(()) => Notice::info("Mod deleted successfully"),
            Err(e) => {
                tracing::error!("Delete failed: {}", e);
                Notice::error(format!("Failed to delete mod: {}", e))
            }
        })
    }

    /// Prompt for a new directory. Cancelling keeps the current one.
    pub fn change_directory(&mut self, prompt: &mut dyn DirectoryPrompt) -> Notice {
        match self.resolver.change_directory(prompt) {
            Some(directory) => {
                self.directory = directory;
                Notice::info(format!("Mod directory set to {}", self.directory.path()))
            }
            None => Notice::info("Mod directory unchanged"),
        }
    }

    /// Switch to `path` if it contains the marker file.
    pub fn set_directory(&mut self, path: &Utf8Path) -> Notice {
        match self.resolver.set_directory(path) {
            Some(directory) => {
                self.directory = directory;
                Notice::info(format!("Mod directory set to {}", self.directory.path()))
            }
            None => Notice::error(format!(
                "Selected folder does not contain {}. Please select the correct Data folder.",
                self.resolver.profile().marker_file
            )),
        }
    }
}

/// Render a listing as a `Mod Name | Type | Status | Size (MB)` table.
pub fn render_listing(mods: &[Mod]) -> String {
    let name_width = mods
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Mod Name".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<4}  {:<8}  {:>9}",
        "Mod Name", "Type", "Status", "Size (MB)"
    );
    for entry in mods {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<4}  {:<8}  {:>9.2}",
            entry.name,
            entry.kind().label(),
            entry.status_label(),
            entry.size_mb()
        );
    }
    out
}
