//! Commands issued against the engine.

use super::action::{Direction, Move, MoveError};
use super::engine::GameEngine;
use super::types::Disc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// An action a player (or the replayer) can issue.
///
/// Only `Move` is reversible; only `NewGame` and `Move` reach the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::IntoStaticStr)]
pub enum Command {
    /// Start over with the given number of discs.
    NewGame(Disc),
    /// Move a disc between towers.
    Move(Move),
    /// Draw the board. No state change.
    Show,
}

impl Command {
    /// Applies the command to the engine.
    ///
    /// `Show` never touches the engine; drawing is the invoker's business.
    ///
    /// # Errors
    ///
    /// Propagates the engine's `MoveError`; the engine is unchanged on error.
    #[instrument(skip(engine))]
    pub fn apply(&self, engine: &mut GameEngine) -> Result<(), MoveError> {
        match self {
            Command::NewGame(discs) => engine.reset_game(*discs),
            Command::Move(action) => action.apply(engine),
            Command::Show => Ok(()),
        }
    }

    /// Whether the command can be taken back.
    pub fn is_reversible(&self) -> bool {
        matches!(self, Command::Move(_))
    }

    /// Short name for diagnostics.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl From<Move> for Command {
    fn from(action: Move) -> Self {
        Command::Move(action)
    }
}

impl Move {
    /// Plays the move forward.
    pub fn apply(&self, engine: &mut GameEngine) -> Result<(), MoveError> {
        engine.perform_move(*self, Direction::Forward)
    }

    /// Takes the move back by playing its inverse in reverse.
    pub fn reverse(&self, engine: &mut GameEngine) -> Result<(), MoveError> {
        engine.perform_move(self.inverse(), Direction::Reverse)
    }
}
