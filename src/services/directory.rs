//! Mod directory resolution.
//!
//! Resolution order at startup (first success wins):
//! 1. Saved configuration whose path still exists (trusted, not re-validated)
//! 2. Platform default candidates that contain the marker file (saved on success)
//! 3. Interactive prompt, repeated until a valid directory is picked or the user cancels
//! 4. The profile's fallback path, unvalidated, reported as [`ModDirectory::Unresolved`]

use crate::config::ConfigStore;
use crate::models::GameProfile;
use camino::{Utf8Path, Utf8PathBuf};

/// The active mod directory for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModDirectory {
    /// Came from configuration or passed marker-file validation.
    Resolved(Utf8PathBuf),
    /// Best-effort fallback after the user cancelled selection. May not
    /// exist; operations on it must degrade rather than fail hard.
    Unresolved(Utf8PathBuf),
}

impl ModDirectory {
    pub fn path(&self) -> &Utf8Path {
        match self {
            ModDirectory::Resolved(path) | ModDirectory::Unresolved(path) => path,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ModDirectory::Resolved(_))
    }
}

/// Interactive source of candidate directories.
///
/// Implemented with native dialogs by the presentation layer and mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryPrompt {
    /// Ask the user for a directory. `None` means the user cancelled.
    fn pick_directory(&mut self, title: &str) -> Option<Utf8PathBuf>;

    /// Tell the user `path` was rejected because `marker_file` is missing.
    fn report_invalid(&mut self, path: &Utf8Path, marker_file: &str);
}

/// Picks the active mod directory and persists user choices.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    store: ConfigStore,
    profile: GameProfile,
}

impl DirectoryResolver {
    pub fn new(store: ConfigStore, profile: GameProfile) -> Self {
        Self { store, profile }
    }

    pub fn profile(&self) -> &GameProfile {
        &self.profile
    }

    /// Determine the mod directory at startup. Never fails; see the module docs.
    pub fn resolve(&self, prompt: &mut dyn DirectoryPrompt) -> ModDirectory {
        if let Some(saved) = self.store.load() {
            return ModDirectory::Resolved(saved);
        }

        for candidate in &self.profile.default_candidates {
            if !candidate.exists() {
                tracing::debug!("Default candidate {} does not exist", candidate);
                continue;
            }
            if self.validate(candidate) {
                tracing::info!("Using default mod directory {}", candidate);
                self.persist(candidate);
                return ModDirectory::Resolved(candidate.clone());
            }
            tracing::warn!(
                "Default candidate {} lacks {}, skipping",
                candidate,
                self.profile.marker_file
            );
        }

        if let Some(picked) = self.prompt_until_valid(prompt) {
            self.persist(&picked);
            return ModDirectory::Resolved(picked);
        }

        tracing::warn!(
            "No mod directory selected, falling back to unvalidated {}",
            self.profile.fallback_dir
        );
        ModDirectory::Unresolved(self.profile.fallback_dir.clone())
    }

    /// Let the user pick a new directory. `None` if they cancelled; the
    /// current directory stays in effect in that case.
    pub fn change_directory(&self, prompt: &mut dyn DirectoryPrompt) -> Option<ModDirectory> {
        let picked = self.prompt_until_valid(prompt)?;
        self.persist(&picked);
        Some(ModDirectory::Resolved(picked))
    }

    /// Accept `path` without prompting if it passes validation, persisting it.
    pub fn set_directory(&self, path: &Utf8Path) -> Option<ModDirectory> {
        if !self.validate(path) {
            tracing::warn!("{} lacks {}, not using it", path, self.profile.marker_file);
            return None;
        }
        self.persist(path);
        Some(ModDirectory::Resolved(path.to_path_buf()))
    }

    pub fn validate(&self, dir: &Utf8Path) -> bool {
        self.profile.is_valid_mod_dir(dir)
    }

    fn prompt_until_valid(&self, prompt: &mut dyn DirectoryPrompt) -> Option<Utf8PathBuf> {
        let title = format!("Select {} Data Folder", self.profile.name);
        loop {
            let picked = prompt.pick_directory(&title)?;
            if self.validate(&picked) {
                tracing::info!("User selected mod directory {}", picked);
                return Some(picked);
            }
            tracing::warn!("Selected folder {} lacks {}", picked, self.profile.marker_file);
            prompt.report_invalid(&picked, &self.profile.marker_file);
        }
    }

    fn persist(&self, dir: &Utf8Path) {
        // The directory is still usable for this session if saving fails
        if let Err(e) = self.store.save(dir) {
            tracing::warn!("Failed to save mod directory: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        root: Utf8PathBuf,
        resolver: DirectoryResolver,
    }

    fn fixture(default_candidates: &[&str]) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let profile = GameProfile {
            name: "Test Game".to_string(),
            marker_file: "Oblivion.esm".to_string(),
            default_candidates: default_candidates.iter().map(|c| root.join(c)).collect(),
            fallback_dir: root.join("fallback"),
        };
        let store = ConfigStore::new(root.join("config").join("config.json"));
        Fixture {
            resolver: DirectoryResolver::new(store, profile),
            root,
            _temp_dir: temp_dir,
        }
    }

    fn make_data_dir(path: &Utf8Path, with_marker: bool) {
        fs::create_dir_all(path).unwrap();
        if with_marker {
            fs::write(path.join("Oblivion.esm"), b"TES4").unwrap();
        }
    }

    fn saved_path(fx: &Fixture) -> Option<Utf8PathBuf> {
        ConfigStore::new(fx.root.join("config").join("config.json")).load()
    }

    #[test]
    fn test_saved_config_wins_without_validation() {
        let fx = fixture(&["default"]);
        let saved = fx.root.join("saved");
        make_data_dir(&saved, false);
        make_data_dir(&fx.root.join("default"), true);
        ConfigStore::new(fx.root.join("config").join("config.json"))
            .save(&saved)
            .unwrap();

        let mut prompt = MockDirectoryPrompt::new();
        prompt.expect_pick_directory().never();

        assert_eq!(fx.resolver.resolve(&mut prompt), ModDirectory::Resolved(saved));
    }

    #[test]
    fn test_valid_default_candidate_is_used_and_saved() {
        let fx = fixture(&["default"]);
        let default = fx.root.join("default");
        make_data_dir(&default, true);

        let mut prompt = MockDirectoryPrompt::new();
        prompt.expect_pick_directory().never();

        assert_eq!(
            fx.resolver.resolve(&mut prompt),
            ModDirectory::Resolved(default.clone())
        );
        assert_eq!(saved_path(&fx), Some(default));
    }

    #[test]
    fn test_invalid_default_falls_through_to_prompt() {
        let fx = fixture(&["default"]);
        make_data_dir(&fx.root.join("default"), false);
        let picked = fx.root.join("picked");
        make_data_dir(&picked, true);

        let mut prompt = MockDirectoryPrompt::new();
        let answer = picked.clone();
        prompt
            .expect_pick_directory()
            .times(1)
            .returning(move |_| Some(answer.clone()));

        assert_eq!(
            fx.resolver.resolve(&mut prompt),
            ModDirectory::Resolved(picked.clone())
        );
        assert_eq!(saved_path(&fx), Some(picked));
    }

    #[test]
    fn test_reprompts_until_valid() {
        let fx = fixture(&[]);
        let bad = fx.root.join("bad");
        let good = fx.root.join("good");
        make_data_dir(&bad, false);
        make_data_dir(&good, true);

        let mut seq = Sequence::new();
        let mut prompt = MockDirectoryPrompt::new();
        let first = bad.clone();
        prompt
            .expect_pick_directory()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Some(first.clone()));
        prompt
            .expect_report_invalid()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        let second = good.clone();
        prompt
            .expect_pick_directory()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Some(second.clone()));

        assert_eq!(fx.resolver.resolve(&mut prompt), ModDirectory::Resolved(good));
    }

    #[test]
    fn test_cancel_falls_back_unresolved() {
        let fx = fixture(&["missing"]);
        let bad = fx.root.join("bad");
        make_data_dir(&bad, false);

        let mut seq = Sequence::new();
        let mut prompt = MockDirectoryPrompt::new();
        let first = bad.clone();
        prompt
            .expect_pick_directory()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Some(first.clone()));
        prompt
            .expect_report_invalid()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        prompt
            .expect_pick_directory()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| None);

        let resolved = fx.resolver.resolve(&mut prompt);
        assert_eq!(resolved, ModDirectory::Unresolved(fx.root.join("fallback")));
        assert!(!resolved.is_resolved());
        assert_eq!(saved_path(&fx), None);
    }

    #[test]
    fn test_change_directory_cancel_keeps_config() {
        let fx = fixture(&[]);
        let mut prompt = MockDirectoryPrompt::new();
        prompt.expect_pick_directory().times(1).returning(|_| None);

        assert_eq!(fx.resolver.change_directory(&mut prompt), None);
        assert_eq!(saved_path(&fx), None);
    }

    #[test]
    fn test_change_directory_saves_choice() {
        let fx = fixture(&[]);
        let picked = fx.root.join("picked");
        make_data_dir(&picked, true);

        let mut prompt = MockDirectoryPrompt::new();
        let answer = picked.clone();
        prompt
            .expect_pick_directory()
            .withf(|title| title.contains("Test Game"))
            .times(1)
            .returning(move |_| Some(answer.clone()));

        assert_eq!(
            fx.resolver.change_directory(&mut prompt),
            Some(ModDirectory::Resolved(picked.clone()))
        );
        assert_eq!(saved_path(&fx), Some(picked));
    }

    #[test]
    fn test_set_directory_validates() {
        let fx = fixture(&[]);
        let bad = fx.root.join("bad");
        make_data_dir(&bad, false);

        assert_eq!(fx.resolver.set_directory(&bad), None);
        assert_eq!(saved_path(&fx), None);
    }
}
