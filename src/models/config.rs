use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Persisted configuration from `config.json`.
///
/// Single global record: `{ "mod_dir": "<absolute path>" }`. Unknown fields
/// are ignored, a missing `mod_dir` makes the whole file unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub mod_dir: Utf8PathBuf,
}

impl Configuration {
    pub fn new(mod_dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            mod_dir: mod_dir.as_ref().to_path_buf(),
        }
    }
}
