//! Durable, line-oriented session log.
//!
//! One line per event:
//!
//! ```text
//! <discs>          first line, written by every new game
//! <from> <to>      a forward move
//! U                an undo
//! R                a redo
//! ```

mod entry;
mod error;
mod session_log;

pub use entry::{EntryParseError, LogEntry, REDO_MARKER, UNDO_MARKER};
pub use error::LogError;
pub use session_log::SessionLog;
