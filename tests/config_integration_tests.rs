//! Integration tests for ConfigStore and directory resolution
//!
//! These tests verify:
//! - Configuration saving, overwriting and loading
//! - Missing and malformed configuration treated as absent
//! - Resolution order: saved config, default candidate, prompt, fallback
//! - Directory changes persisting to the config file

use camino::{Utf8Path, Utf8PathBuf};
use oblivion_modman::{ConfigStore, DirectoryPrompt, DirectoryResolver, GameProfile, ModDirectory};
use std::collections::VecDeque;
use std::fs;
use tempfile::TempDir;

/// Prompt that replays scripted answers and records rejections.
#[derive(Default)]
struct ScriptedPrompt {
    answers: VecDeque<Option<Utf8PathBuf>>,
    asked: usize,
    rejected: Vec<Utf8PathBuf>,
}

impl ScriptedPrompt {
    fn new(answers: impl IntoIterator<Item = Option<Utf8PathBuf>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl DirectoryPrompt for ScriptedPrompt {
    fn pick_directory(&mut self, _title: &str) -> Option<Utf8PathBuf> {
        self.asked += 1;
        self.answers.pop_front().flatten()
    }

    fn report_invalid(&mut self, path: &Utf8Path, _marker_file: &str) {
        self.rejected.push(path.to_path_buf());
    }
}

fn create_test_root() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, root)
}

fn store_in(root: &Utf8Path) -> ConfigStore {
    ConfigStore::new(root.join(".oblivion_mod_manager").join("config.json"))
}

fn resolver_in(root: &Utf8Path) -> DirectoryResolver {
    let profile = GameProfile {
        name: "Oblivion Remastered".to_string(),
        marker_file: "Oblivion.esm".to_string(),
        default_candidates: vec![root.join("steam").join("Data")],
        fallback_dir: root.join("Documents").join("My Games").join("Oblivion").join("Data"),
    };
    DirectoryResolver::new(store_in(root), profile)
}

fn game_data_dir(path: &Utf8Path) -> Utf8PathBuf {
    fs::create_dir_all(path).unwrap();
    fs::write(path.join("Oblivion.esm"), b"TES4").unwrap();
    path.to_path_buf()
}

#[test]
fn test_save_overwrites_previous_record() {
    let (_temp_dir, root) = create_test_root();
    let store = store_in(&root);
    let first = game_data_dir(&root.join("first"));
    let second = game_data_dir(&root.join("second"));

    store.save(&first).unwrap();
    store.save(&second).unwrap();

    assert_eq!(store.load(), Some(second.clone()));
    let raw = fs::read_to_string(store.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["mod_dir"], second.as_str());
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[test]
fn test_schema_mismatch_is_no_configuration() {
    let (_temp_dir, root) = create_test_root();
    let store = store_in(&root);
    fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();

    fs::write(store.config_path(), r#"{"mod_dir": 42}"#).unwrap();
    assert_eq!(store.load(), None);

    fs::write(store.config_path(), r#"["not", "an", "object"]"#).unwrap();
    assert_eq!(store.load(), None);
}

#[test]
fn test_resolve_uses_saved_config() {
    let (_temp_dir, root) = create_test_root();
    let saved = game_data_dir(&root.join("saved"));
    store_in(&root).save(&saved).unwrap();

    let mut prompt = ScriptedPrompt::default();
    let resolved = resolver_in(&root).resolve(&mut prompt);

    assert_eq!(resolved, ModDirectory::Resolved(saved));
    assert_eq!(prompt.asked, 0);
}

#[test]
fn test_resolve_marker_directory_directly() {
    let (_temp_dir, root) = create_test_root();
    let default = game_data_dir(&root.join("steam").join("Data"));

    let mut prompt = ScriptedPrompt::default();
    let resolved = resolver_in(&root).resolve(&mut prompt);

    assert_eq!(resolved, ModDirectory::Resolved(default.clone()));
    assert_eq!(prompt.asked, 0);
    assert_eq!(store_in(&root).load(), Some(default));
}

#[test]
fn test_resolve_never_returns_unmarked_directory() {
    let (_temp_dir, root) = create_test_root();
    let unmarked = root.join("steam").join("Data");
    fs::create_dir_all(&unmarked).unwrap();

    let mut prompt = ScriptedPrompt::new([Some(unmarked.clone()), None]);
    let resolved = resolver_in(&root).resolve(&mut prompt);

    assert_ne!(resolved.path(), unmarked.as_path());
    assert!(!resolved.is_resolved());
    assert_eq!(prompt.rejected, vec![unmarked]);
    assert_eq!(store_in(&root).load(), None);
}

#[test]
fn test_resolve_prompt_retries_then_accepts() {
    let (_temp_dir, root) = create_test_root();
    let wrong = root.join("Wrong");
    fs::create_dir_all(&wrong).unwrap();
    let right = game_data_dir(&root.join("Right"));

    let mut prompt = ScriptedPrompt::new([Some(wrong.clone()), Some(wrong), Some(right.clone())]);
    let resolved = resolver_in(&root).resolve(&mut prompt);

    assert_eq!(resolved, ModDirectory::Resolved(right.clone()));
    assert_eq!(prompt.asked, 3);
    assert_eq!(prompt.rejected.len(), 2);
    assert_eq!(store_in(&root).load(), Some(right));
}

#[test]
fn test_resolve_fallback_when_cancelled() {
    let (_temp_dir, root) = create_test_root();

    let mut prompt = ScriptedPrompt::new([None]);
    let resolved = resolver_in(&root).resolve(&mut prompt);

    assert_eq!(
        resolved,
        ModDirectory::Unresolved(root.join("Documents").join("My Games").join("Oblivion").join("Data"))
    );
    assert!(!resolved.path().exists());
}

#[test]
fn test_change_directory_replaces_saved_config() {
    let (_temp_dir, root) = create_test_root();
    let old = game_data_dir(&root.join("old"));
    let new = game_data_dir(&root.join("new"));
    store_in(&root).save(&old).unwrap();

    let mut prompt = ScriptedPrompt::new([Some(new.clone())]);
    let changed = resolver_in(&root).change_directory(&mut prompt);

    assert_eq!(changed, Some(ModDirectory::Resolved(new.clone())));
    assert_eq!(store_in(&root).load(), Some(new));
}
