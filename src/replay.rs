//! Deterministic replay of a session log.

use crate::games::hanoi::Command;
use crate::history::{GameError, HistoryManager};
use crate::log::{EntryParseError, LogEntry};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Why a replay stopped.
#[derive(Debug, Display, Error)]
pub enum ReplayError {
    /// The log could not be opened or read.
    #[display("Failed to read session log: {}", source)]
    Io {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The log holds no lines at all.
    #[display("Session log is empty")]
    Empty,

    /// A line is malformed.
    #[display("Line {} ({:?}): {}", line, content, source)]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        #[error(not(source))]
        content: String,
        /// What is wrong with it.
        source: EntryParseError,
    },

    /// A well-formed line was rejected by the engine.
    #[display("Line {} ({:?}) rejected: {}", line, content, source)]
    Rejected {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        #[error(not(source))]
        content: String,
        /// The engine's verdict.
        source: GameError,
    },
}

/// Counts of what a replay applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Lines read, including the disc count line.
    pub lines: usize,
    /// Moves executed.
    pub moves: usize,
    /// Undos that took back a move.
    pub undos: usize,
    /// Redos that replayed a move.
    pub redos: usize,
}

/// Reconstructs a session by feeding a log back through a [`HistoryManager`].
///
/// Replay uses the same entry points as live play. The manager's own session
/// log is detached for the duration of the run, so replaying never writes to
/// any log, including the one being read.
#[derive(Debug)]
pub struct Replayer<R> {
    reader: R,
    show_moves: bool,
}

impl Replayer<BufReader<File>> {
    /// Replays the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ReplayError::Io` if the file cannot be opened.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let file = File::open(path.as_ref()).map_err(|source| ReplayError::Io { source })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Replayer<R> {
    /// Replays lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            show_moves: false,
        }
    }

    /// Draws the board after every replayed step.
    pub fn with_show_moves(mut self, show_moves: bool) -> Self {
        self.show_moves = show_moves;
        self
    }

    /// Runs the replay to the end of the log.
    ///
    /// The first line starts a new game; each later line is a move, an undo
    /// or a redo. Replay stops at the first malformed or rejected line; the
    /// manager keeps whatever state the preceding lines produced.
    ///
    /// # Errors
    ///
    /// See [`ReplayError`].
    #[instrument(skip_all, fields(show_moves = self.show_moves))]
    pub fn run(self, manager: &mut HistoryManager) -> Result<ReplayReport, ReplayError> {
        let detached = manager.detach_log();
        let result = self.drive(manager);
        if let Some(log) = detached {
            manager.attach_log(log);
        }

        match &result {
            Ok(report) => info!(?report, "Replay finished"),
            Err(e) => warn!(error = %e, "Replay aborted"),
        }
        result
    }

    fn drive(self, manager: &mut HistoryManager) -> Result<ReplayReport, ReplayError> {
        let show_moves = self.show_moves;
        let mut report = ReplayReport::default();
        let mut lines = self.reader.split(b'\n');

        let header = lines.next().ok_or(ReplayError::Empty)?;
        let header = decode(1, header)?;
        report.lines = 1;

        let discs = match header.parse::<LogEntry>() {
            Ok(LogEntry::Start(discs)) => discs,
            Ok(_) => return Err(parse_error(1, &header, EntryParseError::MissingHeader)),
            Err(e) => return Err(parse_error(1, &header, e)),
        };

        let bounds = manager.engine().bounds();
        if !bounds.contains(discs) {
            let reason = EntryParseError::DiscCountOutOfRange {
                requested: discs,
                min: bounds.min(),
                max: bounds.max(),
            };
            return Err(parse_error(1, &header, reason));
        }

        manager
            .execute(Command::NewGame(discs))
            .map_err(|source| rejected(1, &header, source))?;
        debug!(discs, "Replay started");
        if show_moves {
            show(manager, 1, &header)?;
        }

        for (index, line) in lines.enumerate() {
            let number = index + 2;
            let line = decode(number, line)?;
            report.lines = number;

            let entry = line
                .parse::<LogEntry>()
                .map_err(|e| parse_error(number, &line, e))?;

            match entry {
                LogEntry::Start(_) => {
                    return Err(parse_error(number, &line, EntryParseError::UnexpectedHeader));
                }
                LogEntry::Move(action) => {
                    manager
                        .execute(Command::Move(action))
                        .map_err(|source| rejected(number, &line, source))?;
                    report.moves += 1;
                }
                LogEntry::Undo => {
                    let undone = manager
                        .undo()
                        .map_err(|source| rejected(number, &line, source))?;
                    report.undos += usize::from(undone);
                }
                LogEntry::Redo => {
                    let redone = manager
                        .redo()
                        .map_err(|source| rejected(number, &line, source))?;
                    report.redos += usize::from(redone);
                }
            }
            debug!(line = number, %entry, "Replayed");

            if show_moves {
                show(manager, number, &line)?;
            }
        }

        Ok(report)
    }
}

/// Decodes one raw line. Bytes that are not UTF-8 make the line malformed.
fn decode(line: usize, raw: std::io::Result<Vec<u8>>) -> Result<String, ReplayError> {
    let mut bytes = raw.map_err(|source| ReplayError::Io { source })?;
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|e| {
        let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
        parse_error(line, &content, EntryParseError::InvalidUtf8)
    })
}

fn show(manager: &mut HistoryManager, line: usize, content: &str) -> Result<(), ReplayError> {
    manager
        .execute(Command::Show)
        .map_err(|source| rejected(line, content, source))
}

fn parse_error(line: usize, content: &str, source: EntryParseError) -> ReplayError {
    ReplayError::Parse {
        line,
        content: content.to_string(),
        source,
    }
}

fn rejected(line: usize, content: &str, source: GameError) -> ReplayError {
    ReplayError::Rejected {
        line,
        content: content.to_string(),
        source,
    }
}
