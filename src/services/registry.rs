use crate::models::{Mod, ModState};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

/// Errors that can occur while listing a mod directory
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Mod directory not found: {0}")]
    DirectoryNotFound(Utf8PathBuf),

    #[error("Failed to read mod directory {path}: {source}")]
    ReadDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the mods directly inside `dir`.
///
/// Every call re-reads the directory. Only regular files whose name
/// classifies as a [`ModState`] are returned; directories, symlinks,
/// non-UTF-8 names and unrecognized extensions are skipped silently.
/// The result is sorted by name (case-insensitive, ties broken by exact
/// name) so repeated scans of an unchanged directory are identical.
///
/// # Errors
///
/// [`RegistryError::DirectoryNotFound`] if `dir` is missing or not a
/// directory; callers treat that as an empty listing plus a warning.
pub fn scan(dir: &Utf8Path) -> Result<Vec<Mod>, RegistryError> {
    if !dir.is_dir() {
        tracing::warn!("Mod directory not found: {}", dir);
        return Err(RegistryError::DirectoryNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| RegistryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut mods = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", dir, e);
                continue;
            }
        };

        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("Skipping non-UTF-8 entry in {}", dir);
            continue;
        };

        let Some((_, state)) = ModState::classify(&name) else {
            continue;
        };

        // file_type() does not follow symlinks
        let metadata = match entry.file_type() {
            Ok(file_type) if file_type.is_file() => entry.metadata(),
            Ok(_) => {
                tracing::debug!("Skipping non-file entry {}", name);
                continue;
            }
            Err(e) => Err(e),
        };

        match metadata {
            Ok(metadata) => mods.push(Mod {
                name,
                state,
                size_bytes: metadata.len(),
            }),
            Err(e) => tracing::debug!("Skipping {}: {}", name, e),
        }
    }

    mods.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    tracing::debug!("Scanned {}: {} mods", dir, mods.len());
    Ok(mods)
}
