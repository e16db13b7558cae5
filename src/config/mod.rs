use crate::models::Configuration;
use crate::models::game::home_dir;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Directory under the user's home holding `config.json` and logs.
pub const APP_DIR_NAME: &str = ".oblivion_mod_manager";

/// Persists the configured mod directory across runs.
///
/// Backed by a single JSON file holding a [`Configuration`] record.
/// [`load`](Self::load) never fails: a missing, unreadable or malformed file,
/// or a stored path that no longer exists, all mean "no usable configuration".
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: Utf8PathBuf,
}

impl ConfigStore {
    /// Create a store backed by the given file. Nothing is touched on disk.
    pub fn new<P: AsRef<Utf8Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Store at the per-user default location (`~/.oblivion_mod_manager/config.json`).
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(app_dir()?.join("config.json")))
    }

    /// Load the saved mod directory, if there is one and it still exists.
    pub fn load(&self) -> Option<Utf8PathBuf> {
        let config = match self.read_config() {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::debug!("No config file at {}", self.config_path);
                return None;
            }
            Err(e) => {
                tracing::warn!("Ignoring unusable config {}: {:#}", self.config_path, e);
                return None;
            }
        };

        if !config.mod_dir.exists() {
            tracing::warn!(
                "Configured mod directory {} no longer exists, ignoring it",
                config.mod_dir
            );
            return None;
        }

        tracing::info!("Loaded mod directory {} from {}", config.mod_dir, self.config_path);
        Some(config.mod_dir)
    }

    /// Overwrite the stored record with `mod_dir`, creating parent directories as needed.
    pub fn save(&self, mod_dir: &Utf8Path) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent))?;
        }

        let json = serde_json::to_string_pretty(&Configuration::new(mod_dir))
            .context("Failed to serialize config to JSON")?;

        fs::write(&self.config_path, json)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved mod directory {} to {}", mod_dir, self.config_path);
        Ok(())
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }

    fn read_config(&self) -> Result<Option<Configuration>> {
        if !self.config_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        Ok(Some(config))
    }
}

/// Per-user application directory (`~/.oblivion_mod_manager`).
pub fn app_dir() -> Result<Utf8PathBuf> {
    Ok(home_dir()?.join(APP_DIR_NAME))
}
