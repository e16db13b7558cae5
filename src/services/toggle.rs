use crate::models::{Mod, toggled_name};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;

/// Errors that can occur when toggling a mod
#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("{0} is not a recognized mod file and cannot be toggled")]
    NotToggleable(String),

    #[error("Mod {0} not found")]
    NotFound(Utf8PathBuf),

    #[error("Cannot rename to {0}: a file with that name already exists")]
    TargetExists(Utf8PathBuf),

    #[error("Permission denied renaming {0}")]
    PermissionDenied(Utf8PathBuf),

    #[error("Failed to rename {path}: {source}")]
    Rename {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Flip a mod between enabled and disabled by renaming its file.
///
/// The state is re-derived from `entry.name` rather than trusted from
/// `entry.state`. The rename stays in `dir`; file contents are untouched.
/// On failure nothing is renamed, and callers re-scan either way.
///
/// # Returns
///
/// The mod's new file name.
pub fn toggle(dir: &Utf8Path, entry: &Mod) -> Result<String, ToggleError> {
    toggle_by_name(dir, &entry.name)
}

/// Same as [`toggle`], for callers that only have the file name.
pub fn toggle_by_name(dir: &Utf8Path, name: &str) -> Result<String, ToggleError> {
    let new_name =
        toggled_name(name).ok_or_else(|| ToggleError::NotToggleable(name.to_string()))?;

    let from = dir.join(name);
    let to = dir.join(&new_name);

    if !from.is_file() {
        return Err(ToggleError::NotFound(from));
    }
    // rename() would silently replace an existing sibling on most platforms
    if to.exists() {
        return Err(ToggleError::TargetExists(to));
    }

    fs::rename(&from, &to).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ToggleError::NotFound(from.clone()),
        io::ErrorKind::PermissionDenied => ToggleError::PermissionDenied(from.clone()),
        _ => ToggleError::Rename {
            path: from.clone(),
            source,
        },
    })?;

    tracing::info!("Toggled {} -> {}", name, new_name);
    Ok(new_name)
}
