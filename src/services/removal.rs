use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;

/// Errors that can occur when deleting a mod
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Invalid mod name: {0:?}")]
    InvalidName(String),

    #[error("Mod {0} not found")]
    NotFound(Utf8PathBuf),

    #[error("Failed to delete {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Delete the entry `name` from `dir`.
///
/// Regular files (and symlinks) are unlinked, directories are removed
/// recursively. `name` must be a single plain path component.
pub fn delete(dir: &Utf8Path, name: &str) -> Result<(), DeleteError> {
    let mut components = Utf8Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Utf8Component::Normal(part)), None) if part == name
    );
    if !is_plain {
        return Err(DeleteError::InvalidName(name.to_string()));
    }

    let path = dir.join(name);
    let metadata = match fs::symlink_metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(DeleteError::NotFound(path)),
        Err(source) => return Err(DeleteError::Io { path, source }),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    };

    match result {
        Ok(()) => {
            tracing::info!("Deleted {}", path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DeleteError::NotFound(path)),
        Err(source) => Err(DeleteError::Io { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_mod_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_delete_file() {
        let (_temp_dir, dir) = temp_mod_dir();
        fs::write(dir.join("Foo.esp"), b"data").unwrap();

        delete(&dir, "Foo.esp").unwrap();
        assert!(!dir.join("Foo.esp").exists());
    }

    #[test]
    fn test_delete_directory_recursively() {
        let (_temp_dir, dir) = temp_mod_dir();
        fs::create_dir_all(dir.join("SomeMod").join("textures")).unwrap();
        fs::write(dir.join("SomeMod").join("textures").join("a.dds"), b"").unwrap();

        delete(&dir, "SomeMod").unwrap();
        assert!(!dir.join("SomeMod").exists());
    }

    #[test]
    fn test_delete_missing() {
        let (_temp_dir, dir) = temp_mod_dir();
        assert!(matches!(
            delete(&dir, "Ghost.esp"),
            Err(DeleteError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_rejects_paths() {
        let (_temp_dir, dir) = temp_mod_dir();
        for name in ["", ".", "..", "../Foo.esp", "sub/Foo.esp", "/etc"] {
            assert!(
                matches!(delete(&dir, name), Err(DeleteError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }
}
