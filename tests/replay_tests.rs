// Replay tests against the bundled JSONL fixture
//
// The fixture was recorded with the default configuration, so every logged
// move must be reproduced exactly, including ticks that depend on history
// committed earlier in the same game.

use std::path::PathBuf;
use std::process::Command;

use territory_bot::config::Config;
use territory_bot::replay::{ReplayEngine, ReplayError};
use territory_bot::types::Move;

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_fixture_loads_all_entries() {
    let entries = engine()
        .load_log_file(fixture_path("sample_games.jsonl"))
        .expect("fixture should load");
    assert_eq!(entries.len(), 5);
    assert_eq!(ReplayEngine::group_games(&entries).len(), 2);
}

#[test]
fn test_fixture_replays_without_mismatches() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("sample_games.jsonl"))
        .unwrap();
    let results = engine.replay_all(&entries).unwrap();
    let stats = engine.generate_stats(&results);

    assert_eq!(stats.games, 2);
    assert_eq!(stats.total_turns, 5);
    assert_eq!(stats.mismatches, 0, "{:?}", results);
    assert_eq!(stats.reversals, 0);
}

#[test]
fn test_single_game_replay() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("sample_games.jsonl"))
        .unwrap();
    let results = engine.replay_one(&entries, "demo").unwrap();
    let moves: Vec<Move> = results.iter().map(|r| r.replayed_move).collect();
    assert_eq!(moves, vec![Move::Up, Move::Stay, Move::Up]);
}

#[test]
fn test_tampered_move_is_reported_as_mismatch() {
    let engine = engine();
    let mut entries = engine
        .load_log_file(fixture_path("sample_games.jsonl"))
        .unwrap();
    entries[0].chosen_move = "down".to_string();
    let results = engine.replay_all(&entries).unwrap();
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.mismatches, 1);
    assert!(!results[0].matches);
}

#[test]
fn test_malformed_line_reports_line_number() {
    let path = std::env::temp_dir().join("territory_replay_malformed.jsonl");
    std::fs::write(&path, "\n{not json}\n").unwrap();
    let result = engine().load_log_file(&path);
    assert!(matches!(result, Err(ReplayError::Parse { line: 2, .. })));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_log_file_is_an_error() {
    let result = engine().load_log_file(fixture_path("does_not_exist.jsonl"));
    assert!(matches!(result, Err(ReplayError::Open(_))));
}

#[test]
fn test_replay_binary_reports_fixture() {
    let output = Command::new(env!("CARGO_BIN_EXE_replay"))
        .arg(fixture_path("sample_games.jsonl"))
        .arg("--all")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute replay binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Turns:    5"), "{}", stdout);
    assert!(stdout.contains("Mismatches:     0"), "{}", stdout);
}

#[test]
fn test_replay_binary_requires_mode() {
    let output = Command::new(env!("CARGO_BIN_EXE_replay"))
        .arg(fixture_path("sample_games.jsonl"))
        .output()
        .expect("Failed to execute replay binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Must specify --all or --game"));
}
