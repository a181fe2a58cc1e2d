//! Strictly Hanoi library - Towers of Hanoi with reversible history
//!
//! Every action is a [`Command`] executed through a [`HistoryManager`],
//! which keeps undo/redo stacks of moves and records accepted events in a
//! line-oriented [`SessionLog`]. A [`Replayer`] feeds such a log back
//! through the same invoker to rebuild the session exactly.
//!
//! # Architecture
//!
//! - **Engine**: towers, move legality contracts, completion
//! - **History**: command invoker with branch-discarding undo/redo
//! - **Log**: append-only session log and its line format
//! - **Replay**: deterministic reconstruction from a log
//! - **Runner**: interactive menu loop over any reader/writer
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{GameEngine, HistoryManager};
//!
//! # fn example() -> Result<(), strictly_hanoi::GameError> {
//! let mut manager = HistoryManager::new(GameEngine::default());
//! manager.new_game(3)?;
//! manager.make_move(1, 3)?;
//! manager.undo()?;
//! assert_eq!(manager.redo_count(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod history;
mod log;
mod render;
mod replay;
mod runner;

// Crate-level exports - Configuration
pub use config::{ConfigError, HanoiConfig};

// Crate-level exports - Game types
pub use games::hanoi::{
    Command, Contract, Direction, Disc, DiscBounds, DiscCountBoundedInvariant,
    DiscsConservedInvariant, DistinctTowers, GameEngine, HanoiInvariants, Invariant,
    InvariantSet, InvariantViolation, LegalMove, Move, MoveContract, MoveError, SizeOrdered,
    SourceNotEmpty, TOWER_COUNT, Tower, TowerId, TowersOrderedInvariant,
};

// Crate-level exports - History
pub use history::{GameError, GameSnapshot, HistoryManager};

// Crate-level exports - Session log
pub use log::{EntryParseError, LogEntry, LogError, REDO_MARKER, SessionLog, UNDO_MARKER};

// Crate-level exports - Rendering
pub use render::{AnsiRenderer, NullRenderer, Renderer, draw};

// Crate-level exports - Replay
pub use replay::{ReplayError, ReplayReport, Replayer};

// Crate-level exports - Interactive runner
pub use runner::{GameRunner, MenuOption, RunOutcome};
