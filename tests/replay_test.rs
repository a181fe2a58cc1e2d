//! Tests for deterministic session replay.

use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

use strictly_hanoi::{
    EntryParseError, GameEngine, GameError, HistoryManager, MoveError, ReplayError, Replayer,
    SessionLog,
};

fn replay(log: &str) -> (HistoryManager, Result<strictly_hanoi::ReplayReport, ReplayError>) {
    let mut manager = HistoryManager::new(GameEngine::default());
    let result = Replayer::new(Cursor::new(log.to_string())).run(&mut manager);
    (manager, result)
}

#[test]
fn test_replay_optimal_solution() {
    let (manager, result) = replay("3\n1 3\n1 2\n3 2\n1 3\n2 1\n2 3\n1 3\n");
    let report = result.expect("Valid log");

    assert_eq!(report.lines, 8);
    assert_eq!(report.moves, 7);
    assert!(manager.engine().is_completed());
    assert_eq!(manager.engine().moves(), 7);
    assert_eq!(manager.undo_count(), 7);
}

#[test]
fn test_replay_undo_markers() {
    let (manager, result) = replay("3\n1 3\n1 2\nU\nU\n1 2\n");
    let report = result.expect("Valid log");

    assert_eq!(report.undos, 2);
    let snapshot = manager.snapshot();
    assert_eq!(snapshot.towers, vec![vec![2, 3], vec![1], vec![]]);
    assert_eq!(snapshot.moves, 1);
    assert_eq!(snapshot.undo_count, 1);
    assert_eq!(snapshot.redo_count, 0);
}

#[test]
fn test_replay_matches_live_session() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("Hanoi.log");

    let mut live = HistoryManager::new(GameEngine::default())
        .with_log(SessionLog::open(&path).expect("Log opens"));
    live.new_game(4).unwrap();
    for (from, to) in [(1, 2), (1, 3), (2, 3), (1, 2)] {
        live.make_move(from, to).unwrap();
    }
    live.undo().unwrap();
    live.undo().unwrap();
    live.redo().unwrap();
    let _ = live.make_move(1, 1);
    live.make_move(3, 1).unwrap();
    live.undo().unwrap();
    live.close_log().unwrap();

    let mut replayed = HistoryManager::new(GameEngine::default());
    Replayer::from_path(&path)
        .expect("Log exists")
        .run(&mut replayed)
        .expect("Replay succeeds");

    assert_eq!(replayed.snapshot(), live.snapshot());
    assert_eq!(replayed.engine(), live.engine());
}

#[test]
fn test_replay_does_not_write_attached_log() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("Hanoi.log");
    let content = "3\n1 3\nU\n";
    fs::write(&path, content).expect("Write failed");

    let other = dir.path().join("other.log");
    let mut manager = HistoryManager::new(GameEngine::default())
        .with_log(SessionLog::open(&other).expect("Log opens"));
    Replayer::from_path(&path)
        .expect("Log exists")
        .run(&mut manager)
        .expect("Replay succeeds");

    assert_eq!(fs::read_to_string(&path).unwrap(), content);
    assert_eq!(fs::read_to_string(&other).unwrap(), "");
    assert!(manager.log().is_some(), "Log is reattached after replay");

    // Live play after replay records again
    manager.make_move(1, 2).unwrap();
    assert_eq!(fs::read_to_string(&other).unwrap(), "1 2\n");
}

#[test]
fn test_empty_log_rejected() {
    let (_, result) = replay("");
    assert!(matches!(result, Err(ReplayError::Empty)));
}

#[test]
fn test_header_must_be_disc_count() {
    let (_, result) = replay("1 3\n");
    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 1,
            source: EntryParseError::MissingHeader,
            ..
        })
    ));
}

#[test]
fn test_header_out_of_range_rejected() {
    let (_, result) = replay("9\n");
    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 1,
            source: EntryParseError::DiscCountOutOfRange { requested: 9, .. },
            ..
        })
    ));
}

#[test]
fn test_malformed_line_identified() {
    let (manager, result) = replay("3\n1 3\n1 two\n1 2\n");
    let err = result.unwrap_err();

    match &err {
        ReplayError::Parse { line, content, source } => {
            assert_eq!(*line, 3);
            assert_eq!(content, "1 two");
            assert_eq!(source, &EntryParseError::NotAnInteger("two".to_string()));
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
    assert!(err.to_string().contains("Line 3"));
    // Lines before the bad one were applied
    assert_eq!(manager.engine().moves(), 1);
}

#[test]
fn test_wrong_token_count_and_tower_range() {
    let (_, result) = replay("3\n1 2 3\n");
    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 2,
            source: EntryParseError::WrongTokenCount(3),
            ..
        })
    ));

    let (_, result) = replay("3\n1 4\n");
    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 2,
            source: EntryParseError::NoSuchTower(4),
            ..
        })
    ));
}

#[test]
fn test_blank_and_repeated_header_lines_rejected() {
    let (_, result) = replay("3\n\n1 3\n");
    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 2,
            source: EntryParseError::Blank,
            ..
        })
    ));

    let (_, result) = replay("3\n1 3\n4\n");
    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 3,
            source: EntryParseError::UnexpectedHeader,
            ..
        })
    ));
}

#[test]
fn test_illegal_logged_move_rejected() {
    let (manager, result) = replay("3\n2 1\n");
    assert!(matches!(
        result,
        Err(ReplayError::Rejected {
            line: 2,
            source: GameError::Move(MoveError::EmptySource(_)),
            ..
        })
    ));
    assert_eq!(manager.undo_count(), 0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = Replayer::from_path(dir.path().join("nope.log"));
    assert!(matches!(result, Err(ReplayError::Io { .. })));
}

#[test]
fn test_non_utf8_line_identified() {
    let mut manager = HistoryManager::new(GameEngine::default());
    let log: &[u8] = b"3\n1 3\n\xff\xfe\n";
    let result = Replayer::new(log).run(&mut manager);

    assert!(matches!(
        result,
        Err(ReplayError::Parse {
            line: 3,
            source: EntryParseError::InvalidUtf8,
            ..
        })
    ));
    assert_eq!(manager.engine().moves(), 1);
}

#[test]
fn test_crlf_log_replays() {
    let (manager, result) = replay("3\r\n1 3\r\nU\r\n");
    assert_eq!(result.expect("Valid log").undos, 1);
    assert_eq!(manager.redo_count(), 1);
}

#[test]
fn test_markers_on_empty_history_not_counted() {
    let (manager, result) = replay("3\nU\nR\n1 2\nU\nU\n");
    let report = result.expect("Valid log");

    assert_eq!(report.lines, 6);
    assert_eq!(report.moves, 1);
    assert_eq!(report.undos, 1);
    assert_eq!(report.redos, 0);
    assert_eq!(manager.undo_count(), 0);
    assert_eq!(manager.redo_count(), 1);
}
