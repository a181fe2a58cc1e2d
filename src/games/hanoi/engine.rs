//! The Towers of Hanoi engine: sole authority on puzzle state and move legality.

use super::action::{Direction, Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::types::{Disc, DiscBounds, TOWER_COUNT, Tower, TowerId};
use tracing::{debug, info, instrument};

/// Puzzle state: three towers, the disc count and the move counter.
///
/// A freshly constructed engine has no discs until [`GameEngine::reset_game`]
/// is called. Every mutation goes through the move contract, so the towers
/// always hold discs `1..=discs` exactly once, smallest on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    pub(crate) towers: [Tower; TOWER_COUNT],
    pub(crate) discs: Disc,
    pub(crate) moves: u32,
    bounds: DiscBounds,
}

impl GameEngine {
    /// Creates an engine with no game in progress.
    #[instrument]
    pub fn new(bounds: DiscBounds) -> Self {
        Self {
            towers: Default::default(),
            discs: 0,
            moves: 0,
            bounds,
        }
    }

    /// Starts a new game with `discs` discs stacked on the first tower.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::DiscCountOutOfRange` if `discs` lies outside the
    /// configured bounds. The engine is unchanged in that case.
    #[instrument(skip(self), fields(min = self.bounds.min(), max = self.bounds.max()))]
    pub fn reset_game(&mut self, discs: Disc) -> Result<(), MoveError> {
        if !self.bounds.contains(discs) {
            return Err(MoveError::DiscCountOutOfRange {
                requested: discs,
                min: self.bounds.min(),
                max: self.bounds.max(),
            });
        }

        self.towers.iter_mut().for_each(Tower::clear);
        self.towers[TowerId::First.to_index()] = Tower::filled(discs);
        self.discs = discs;
        self.moves = 0;

        info!(discs, "Game reset");
        Ok(())
    }

    /// Moves the top disc of `action.from()` onto `action.to()`.
    ///
    /// `Direction::Forward` increments the move counter, `Direction::Reverse`
    /// decrements it (never below zero). An undo is simply the inverse move
    /// played in reverse, so the same legality rules apply to both.
    ///
    /// # Errors
    ///
    /// Checked in order: `EmptySource`, `SameTower`, `SizeViolation`. The
    /// engine is unchanged on error.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn perform_move(&mut self, action: Move, direction: Direction) -> Result<(), MoveError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        MoveContract::pre(self, &action)?;

        let disc = self.towers[action.from().to_index()]
            .pop()
            .ok_or(MoveError::EmptySource(action.from()))?;
        self.towers[action.to().to_index()].push(disc);

        self.moves = match direction {
            Direction::Forward => self.moves.saturating_add(1),
            Direction::Reverse => self.moves.saturating_sub(1),
        };

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            tracing::warn!(error = %e, %action, "Postcondition failed, move rolled back");
            *self = before;
            return Err(e);
        }

        debug!(disc, %action, ?direction, moves = self.moves, "Disc moved");
        Ok(())
    }

    /// Whether every disc sits on the third tower.
    ///
    /// True for an engine with no game started, since zero discs are trivially in place.
    pub fn is_completed(&self) -> bool {
        self.towers[TowerId::Third.to_index()].len() == usize::from(self.discs)
    }

    /// Whether a game has been started.
    pub fn is_started(&self) -> bool {
        self.discs > 0
    }

    /// Number of discs in the current game.
    pub fn discs(&self) -> Disc {
        self.discs
    }

    /// Moves played, net of undos.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// The given tower.
    pub fn tower(&self, id: TowerId) -> &Tower {
        &self.towers[id.to_index()]
    }

    /// Number of discs on the given tower.
    pub fn tower_len(&self, id: TowerId) -> usize {
        self.tower(id).len()
    }

    /// All towers, left to right.
    pub fn towers(&self) -> &[Tower; TOWER_COUNT] {
        &self.towers
    }

    /// Disc count bounds accepted by [`GameEngine::reset_game`].
    pub fn bounds(&self) -> DiscBounds {
        self.bounds
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(DiscBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(debug_assertions)]
    fn test_failed_postcondition_rolls_back() {
        let mut engine = GameEngine::default();
        engine.reset_game(3).unwrap();
        // A duplicate disc breaks conservation without affecting legality
        engine.towers[TowerId::Second.to_index()].push(3);
        let corrupted = engine.clone();

        let result = engine.perform_move(
            Move::new(TowerId::First, TowerId::Third),
            Direction::Forward,
        );

        assert!(matches!(result, Err(MoveError::InvariantViolation(_))));
        assert_eq!(engine, corrupted);
    }
}
