//! Log line format shared by the writer and the replayer.

use crate::games::hanoi::{Disc, Move};
use derive_more::Display;
use std::str::FromStr;

/// Marker line recorded for an undo.
pub const UNDO_MARKER: &str = "U";

/// Marker line recorded for a redo.
pub const REDO_MARKER: &str = "R";

/// One line of the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    /// Header written by a new game: the disc count.
    Start(Disc),
    /// A forward move.
    Move(Move),
    /// An undo of the most recent move.
    Undo,
    /// A redo of the most recently undone move.
    Redo,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEntry::Start(discs) => write!(f, "{}", discs),
            LogEntry::Move(action) => {
                write!(f, "{} {}", action.from().number(), action.to().number())
            }
            LogEntry::Undo => f.write_str(UNDO_MARKER),
            LogEntry::Redo => f.write_str(REDO_MARKER),
        }
    }
}

/// Why a log line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EntryParseError {
    /// The line holds nothing.
    #[display("blank line")]
    Blank,

    /// The line is not valid UTF-8.
    #[display("line is not valid UTF-8")]
    InvalidUtf8,

    /// Neither a marker, a disc count nor a tower pair.
    #[display("expected 1 or 2 tokens, found {}", _0)]
    WrongTokenCount(usize),

    /// A token that should be a number is not.
    #[display("{:?} is not an integer", _0)]
    NotAnInteger(String),

    /// A tower number outside 1-3.
    #[display("there is no tower numbered {}", _0)]
    NoSuchTower(usize),

    /// A disc count where a move or marker was expected.
    #[display("unexpected disc count after the first line")]
    UnexpectedHeader,

    /// The first line is not a disc count.
    #[display("first line must be the disc count")]
    MissingHeader,

    /// A disc count outside the configured bounds.
    #[display("disc count {} is outside the allowed range {}..={}", requested, min, max)]
    DiscCountOutOfRange {
        /// Logged disc count.
        requested: Disc,
        /// Configured minimum.
        min: Disc,
        /// Configured maximum.
        max: Disc,
    },
}

impl std::error::Error for EntryParseError {}

fn parse_number<T: FromStr>(token: &str) -> Result<T, EntryParseError> {
    token
        .parse()
        .map_err(|_| EntryParseError::NotAnInteger(token.to_string()))
}

impl FromStr for LogEntry {
    type Err = EntryParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line == UNDO_MARKER {
            return Ok(LogEntry::Undo);
        }
        if line == REDO_MARKER {
            return Ok(LogEntry::Redo);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(EntryParseError::Blank),
            [discs] => Ok(LogEntry::Start(parse_number(discs)?)),
            [from, to] => {
                let from: usize = parse_number(from)?;
                let to: usize = parse_number(to)?;
                Move::from_numbers(from, to)
                    .map(LogEntry::Move)
                    .map_err(|_| {
                        let bad = if (1..=3).contains(&from) { to } else { from };
                        EntryParseError::NoSuchTower(bad)
                    })
            }
            other => Err(EntryParseError::WrongTokenCount(other.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hanoi::TowerId;

    #[test]
    fn test_entries_format_as_log_lines() {
        assert_eq!(LogEntry::Start(5).to_string(), "5");
        assert_eq!(
            LogEntry::Move(Move::new(TowerId::First, TowerId::Third)).to_string(),
            "1 3"
        );
        assert_eq!(LogEntry::Undo.to_string(), "U");
        assert_eq!(LogEntry::Redo.to_string(), "R");
    }

    #[test]
    fn test_parse_markers_and_moves() {
        assert_eq!("U".parse::<LogEntry>(), Ok(LogEntry::Undo));
        assert_eq!("R\r".parse::<LogEntry>(), Ok(LogEntry::Redo));
        assert_eq!(
            "2 1".parse::<LogEntry>(),
            Ok(LogEntry::Move(Move::new(TowerId::Second, TowerId::First)))
        );
        assert_eq!("4".parse::<LogEntry>(), Ok(LogEntry::Start(4)));
    }

    #[test]
    fn test_same_tower_pair_parses() {
        // Legality is the engine's concern, not the parser's
        assert!(matches!("3 3".parse::<LogEntry>(), Ok(LogEntry::Move(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert_eq!("".parse::<LogEntry>(), Err(EntryParseError::Blank));
        assert_eq!(
            "1 2 3".parse::<LogEntry>(),
            Err(EntryParseError::WrongTokenCount(3))
        );
        assert_eq!(
            "1 x".parse::<LogEntry>(),
            Err(EntryParseError::NotAnInteger("x".to_string()))
        );
        assert_eq!(
            "1 4".parse::<LogEntry>(),
            Err(EntryParseError::NoSuchTower(4))
        );
        assert_eq!(
            "0 2".parse::<LogEntry>(),
            Err(EntryParseError::NoSuchTower(0))
        );
        assert_eq!(
            "u".parse::<LogEntry>(),
            Err(EntryParseError::NotAnInteger("u".to_string()))
        );
    }
}
