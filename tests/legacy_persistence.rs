//! Integration tests for the persisted legacy record
//!
//! The best legacy pair is the only state that outlives a store. These
//! tests cover the JSON file store across store instances, including
//! missing, corrupt and nested paths.

use persona_politics::core::config::SimulationConfig;
use persona_politics::core::random::SeededRandom;
use persona_politics::core::types::{Difficulty, MiniGameOutcome};
use persona_politics::persistence::{JsonFileLegacyStore, LegacyStore, LEGACY_KEY};
use persona_politics::state::legacy::{LegacyRecord, LegacyTitle};
use persona_politics::state::{GameResult, GameStore};
use std::fs;
use std::path::Path;

fn file_store(path: &Path) -> GameStore {
    GameStore::new(
        SimulationConfig::default(),
        Box::new(SeededRandom::new(7)),
        Box::new(JsonFileLegacyStore::new(path)),
    )
    .unwrap()
}

/// Approve justice reform until the term is won
fn win_term(store: &mut GameStore) {
    store.start_term();
    while store
        .resolve_policy("justice", Difficulty::Hard, MiniGameOutcome::new(true, 0, 3))
        .unwrap()
        .is_some()
    {}
    assert_eq!(store.result(), Some(GameResult::Win));
}

// ============================================================================
// File store
// ============================================================================

#[test]
fn test_missing_file_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLegacyStore::new(dir.path().join("legacy.json"));
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_file_round_trip_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves").join("legacy.json");
    let mut store = JsonFileLegacyStore::new(&path);
    let record = LegacyRecord {
        best_index: 81.25,
        best_title: Some(LegacyTitle::RespectedStatesman),
    };
    store.save(&record).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[LEGACY_KEY]["best_title"], "Respected Statesman");
    assert_eq!(JsonFileLegacyStore::new(&path).load().unwrap(), Some(record));
}

// ============================================================================
// Across store instances
// ============================================================================

#[test]
fn test_new_best_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");

    let mut first = file_store(&path);
    win_term(&mut first);
    let evaluation = *first.last_evaluation().unwrap();
    assert!(evaluation.new_best);
    assert!(path.exists());

    let second = file_store(&path);
    assert_eq!(second.legacy().best().best_index, evaluation.index);
    assert_eq!(second.legacy().best().best_title, Some(evaluation.title));
}

#[test]
fn test_worse_term_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");

    let mut first = file_store(&path);
    win_term(&mut first);
    let saved = fs::read_to_string(&path).unwrap();

    // Ending straight away scores the starting position, well below a win
    let mut second = file_store(&path);
    second.start_term();
    second.end_term();
    let evaluation = second.last_evaluation().unwrap();
    assert!(!evaluation.new_best);
    assert_eq!(fs::read_to_string(&path).unwrap(), saved);
}

#[test]
fn test_corrupt_file_is_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");
    fs::write(&path, "{ not json").unwrap();

    let mut store = file_store(&path);
    assert_eq!(store.legacy().best(), &LegacyRecord::default());

    // The next evaluation replaces the unreadable file
    store.start_term();
    store.end_term();
    let reloaded = JsonFileLegacyStore::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded.best_index, store.legacy().best().best_index);
}
