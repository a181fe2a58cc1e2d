//! Tests for the session log written during play.

use std::fs;
use tempfile::TempDir;

use strictly_hanoi::{GameEngine, HistoryManager, LogEntry, LogError, SessionLog};

fn logged_manager(dir: &TempDir) -> (HistoryManager, std::path::PathBuf) {
    let path = dir.path().join("Hanoi.log");
    let log = SessionLog::open(&path).expect("Log opens");
    (HistoryManager::new(GameEngine::default()).with_log(log), path)
}

fn lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Log readable")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_open_truncates_existing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("old.log");
    fs::write(&path, "3\n1 3\n").expect("Write failed");

    let log = SessionLog::open(&path).expect("Log opens");
    assert!(log.is_open());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_open_fails_for_missing_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("Hanoi.log");
    assert!(matches!(SessionLog::open(&path), Err(LogError::Open { .. })));
}

#[test]
fn test_session_events_are_logged() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (mut manager, path) = logged_manager(&dir);

    manager.new_game(3).unwrap();
    manager.make_move(1, 3).unwrap();
    manager.make_move(1, 2).unwrap();
    manager.undo().unwrap();
    manager.redo().unwrap();
    manager.show().unwrap();

    assert_eq!(lines(&path), ["3", "1 3", "1 2", "U", "R"]);
}

#[test]
fn test_rejected_commands_are_not_logged() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (mut manager, path) = logged_manager(&dir);

    manager.new_game(3).unwrap();
    assert!(manager.make_move(2, 1).is_err());
    assert!(manager.make_move(1, 1).is_err());
    assert!(!manager.undo().unwrap());
    assert!(!manager.redo().unwrap());
    assert!(manager.new_game(42).is_err());

    assert_eq!(lines(&path), ["3"]);
}

#[test]
fn test_new_game_restarts_log() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (mut manager, path) = logged_manager(&dir);

    manager.new_game(3).unwrap();
    manager.make_move(1, 3).unwrap();
    manager.new_game(5).unwrap();
    manager.make_move(1, 2).unwrap();

    assert_eq!(lines(&path), ["5", "1 2"]);
}

#[test]
fn test_append_after_close_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("Hanoi.log");
    let mut log = SessionLog::open(&path).expect("Log opens");

    log.append(&LogEntry::Start(4)).unwrap();
    log.close().unwrap();
    log.close().unwrap();
    assert!(!log.is_open());
    assert!(matches!(log.append(&LogEntry::Undo), Err(LogError::Closed { .. })));
    assert_eq!(lines(&path), ["4"]);
}

#[test]
fn test_closed_log_is_fatal_for_session() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (mut manager, _path) = logged_manager(&dir);

    manager.new_game(3).unwrap();
    manager.close_log().unwrap();

    let err = manager.make_move(1, 3).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_drop_releases_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("Hanoi.log");
    {
        let mut log = SessionLog::open(&path).expect("Log opens");
        log.reset(2).unwrap();
        log.append(&LogEntry::Undo).unwrap();
    }
    assert_eq!(lines(&path), ["2", "U"]);
}
