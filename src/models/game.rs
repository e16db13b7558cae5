use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;

/// Windows Steam/retail install location of the game's `Data` folder.
pub const WINDOWS_DEFAULT_DATA_DIR: &str =
    "C:/Program Files (x86)/Bethesda Softworks/Oblivion Remastered/Data";

/// Game-specific locations used when resolving the mod directory.
///
/// [`GameProfile::oblivion_remastered`] builds the real profile from the
/// user's home directory; tests construct one by hand with temp paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProfile {
    /// Display name, used in dialog titles.
    pub name: String,
    /// File that must exist directly inside a valid mod directory.
    pub marker_file: String,
    /// Platform default locations, tried in order.
    pub default_candidates: Vec<Utf8PathBuf>,
    /// Used unvalidated when the user cancels every prompt.
    pub fallback_dir: Utf8PathBuf,
}

impl GameProfile {
    pub fn oblivion_remastered() -> Result<Self> {
        let home = home_dir()?;

        let default_candidate = if cfg!(windows) {
            Utf8PathBuf::from(WINDOWS_DEFAULT_DATA_DIR)
        } else {
            home.join(".steam/steam/steamapps/common/Oblivion Remastered/Data")
        };

        Ok(Self {
            name: "Oblivion Remastered".to_string(),
            marker_file: "Oblivion.esm".to_string(),
            default_candidates: vec![default_candidate],
            fallback_dir: home.join("Documents").join("My Games").join("Oblivion").join("Data"),
        })
    }

    /// A directory is a valid mod directory iff the marker file sits directly inside it.
    pub fn is_valid_mod_dir(&self, dir: &Utf8Path) -> bool {
        dir.join(&self.marker_file).is_file()
    }
}

/// The current user's home directory as a UTF-8 path.
pub fn home_dir() -> Result<Utf8PathBuf> {
    let base = BaseDirs::new().context("Failed to resolve home directory")?;
    Utf8PathBuf::try_from(base.home_dir().to_path_buf())
        .context("Home directory path is not valid UTF-8")
}
