//! Command invoker with reversible move history.

use crate::games::hanoi::{Command, Disc, GameEngine, Move, MoveError, TowerId};
use crate::log::{LogEntry, LogError, SessionLog};
use crate::render::{NullRenderer, Renderer};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Error returned by the invoker.
#[derive(Debug, Display, Error, From)]
pub enum GameError {
    /// The command was rejected; nothing changed.
    #[display("{}", _0)]
    Move(MoveError),

    /// The session log failed; the session must end.
    #[display("{}", _0)]
    Log(LogError),
}

impl GameError {
    /// Whether the session can continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Log(_))
    }
}

/// Serializable view of a session: towers, counters and history depths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Tower contents, top disc first, T1 to T3.
    pub towers: Vec<Vec<Disc>>,
    /// Disc count.
    pub discs: Disc,
    /// Move counter.
    pub moves: u32,
    /// Moves available to undo.
    pub undo_count: usize,
    /// Moves available to redo.
    pub redo_count: usize,
    /// Whether the puzzle is solved.
    pub completed: bool,
}

/// Executes commands against the engine and keeps undo/redo history.
///
/// Both stacks hold only moves. A new move discards the redo stack; a new
/// game clears both. Accepted `NewGame`, `Move`, undo and redo events are
/// recorded in the session log when one is attached.
pub struct HistoryManager {
    engine: GameEngine,
    undo_stack: Vec<Move>,
    redo_stack: Vec<Move>,
    log: Option<SessionLog>,
    renderer: Box<dyn Renderer>,
}

impl HistoryManager {
    /// Creates an invoker over `engine` with empty history, no log and no drawing.
    #[instrument(skip(engine))]
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            log: None,
            renderer: Box::new(NullRenderer),
        }
    }

    /// Records accepted events to `log`.
    pub fn with_log(mut self, log: SessionLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Draws the board through `renderer` on `Show`.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Executes a command.
    ///
    /// A rejected command leaves the engine, both stacks and the log untouched.
    ///
    /// # Errors
    ///
    /// `GameError::Move` if the engine rejects the command (recoverable);
    /// `GameError::Log` if the log cannot be written (fatal).
    #[instrument(skip(self), fields(kind = command.kind()))]
    pub fn execute(&mut self, command: Command) -> Result<(), GameError> {
        if let Err(e) = command.apply(&mut self.engine) {
            warn!(error = %e, "Command rejected");
            return Err(e.into());
        }

        match command {
            Command::NewGame(discs) => {
                self.undo_stack.clear();
                self.redo_stack.clear();
                if let Some(log) = self.log.as_mut() {
                    log.reset(discs)?;
                }
                info!(discs, "New game started");
            }
            Command::Move(action) => {
                self.undo_stack.push(action);
                if !self.redo_stack.is_empty() {
                    debug!(discarded = self.redo_stack.len(), "Redo branch discarded");
                    self.redo_stack.clear();
                }
                self.record(&LogEntry::Move(action))?;
                info!(%action, moves = self.engine.moves(), "Move executed");
            }
            Command::Show => self.renderer.render(&self.engine),
        }

        Ok(())
    }

    /// Takes back the most recent move. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// `GameError::Log` if the undo cannot be logged. A `GameError::Move` here
    /// would mean the history no longer matches the towers; the move stays on
    /// the undo stack in that case.
    #[instrument(skip(self), fields(undo = self.undo_stack.len(), redo = self.redo_stack.len()))]
    pub fn undo(&mut self) -> Result<bool, GameError> {
        let Some(action) = self.undo_stack.pop() else {
            debug!("Nothing to undo");
            return Ok(false);
        };

        if let Err(e) = action.reverse(&mut self.engine) {
            warn!(error = %e, %action, "Undo rejected");
            self.undo_stack.push(action);
            return Err(e.into());
        }

        self.redo_stack.push(action);
        self.record(&LogEntry::Undo)?;
        info!(%action, moves = self.engine.moves(), "Move undone");
        Ok(true)
    }

    /// Replays the most recently undone move. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// Same as [`HistoryManager::undo`].
    #[instrument(skip(self), fields(undo = self.undo_stack.len(), redo = self.redo_stack.len()))]
    pub fn redo(&mut self) -> Result<bool, GameError> {
        let Some(action) = self.redo_stack.pop() else {
            debug!("Nothing to redo");
            return Ok(false);
        };

        if let Err(e) = action.apply(&mut self.engine) {
            warn!(error = %e, %action, "Redo rejected");
            self.redo_stack.push(action);
            return Err(e.into());
        }

        self.undo_stack.push(action);
        self.record(&LogEntry::Redo)?;
        info!(%action, moves = self.engine.moves(), "Move redone");
        Ok(true)
    }

    fn record(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        match self.log.as_mut() {
            Some(log) => log.append(entry),
            None => Ok(()),
        }
    }

    /// Starts a new game. See [`HistoryManager::execute`].
    pub fn new_game(&mut self, discs: Disc) -> Result<(), GameError> {
        self.execute(Command::NewGame(discs))
    }

    /// Moves a disc between 1-based tower numbers. See [`HistoryManager::execute`].
    pub fn make_move(&mut self, from: usize, to: usize) -> Result<(), GameError> {
        let action = Move::from_numbers(from, to)?;
        self.execute(Command::Move(action))
    }

    /// Draws the board.
    pub fn show(&mut self) -> Result<(), GameError> {
        self.execute(Command::Show)
    }

    /// Number of moves that can be undone.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of moves that can be redone.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// The engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Current state and history depths.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            towers: TowerId::all()
                .map(|id| self.engine.tower(id).top_down())
                .collect(),
            discs: self.engine.discs(),
            moves: self.engine.moves(),
            undo_count: self.undo_count(),
            redo_count: self.redo_count(),
            completed: self.engine.is_completed(),
        }
    }

    /// The attached session log, if any.
    pub fn log(&self) -> Option<&SessionLog> {
        self.log.as_ref()
    }

    /// Detaches the session log so that nothing is recorded until it is reattached.
    pub fn detach_log(&mut self) -> Option<SessionLog> {
        self.log.take()
    }

    /// Attaches a session log, returning the one it replaces.
    pub fn attach_log(&mut self, log: SessionLog) -> Option<SessionLog> {
        self.log.replace(log)
    }

    /// Flushes and releases the session log, if any.
    ///
    /// # Errors
    ///
    /// Returns `LogError` if buffered lines cannot be flushed.
    #[instrument(skip(self))]
    pub fn close_log(&mut self) -> Result<(), LogError> {
        match self.log.as_mut() {
            Some(log) => log.close(),
            None => Ok(()),
        }
    }
}
