//! Contract-based validation for Towers of Hanoi.
//!
//! Contracts formalize move legality as Hoare-style reasoning: {P} move {Q}.
//! Preconditions are checked on every move in both directions; postconditions
//! are checked in debug builds.

use super::action::{Move, MoveError};
use super::engine::GameEngine;
use super::invariants::{HanoiInvariants, InvariantSet};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the source tower must hold a disc.
pub struct SourceNotEmpty;

impl SourceNotEmpty {
    /// Checks the source tower.
    #[instrument(skip(engine))]
    pub fn check(mov: &Move, engine: &GameEngine) -> Result<(), MoveError> {
        if engine.tower(mov.from()).is_empty() {
            Err(MoveError::EmptySource(mov.from()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: source and destination must differ.
pub struct DistinctTowers;

impl DistinctTowers {
    /// Checks the tower pair.
    #[instrument]
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        if mov.from() == mov.to() {
            Err(MoveError::SameTower(mov.from()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the moving disc must be smaller than the destination's top disc.
pub struct SizeOrdered;

impl SizeOrdered {
    /// Checks disc sizes. An empty source passes; `SourceNotEmpty` covers it.
    #[instrument(skip(engine))]
    pub fn check(mov: &Move, engine: &GameEngine) -> Result<(), MoveError> {
        match (engine.tower(mov.from()).top(), engine.tower(mov.to()).top()) {
            (Some(disc), Some(target)) if target < disc => {
                Err(MoveError::SizeViolation { disc, target })
            }
            _ => Ok(()),
        }
    }
}

/// Composite precondition, checked in order: non-empty source, distinct towers, size order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(engine))]
    pub fn check(mov: &Move, engine: &GameEngine) -> Result<(), MoveError> {
        SourceNotEmpty::check(mov, engine)?;
        DistinctTowers::check(mov)?;
        SizeOrdered::check(mov, engine)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - All discs conserved
/// - All towers ordered
/// - Move counter changed by exactly one (or stayed at zero on reversal)
pub struct MoveContract;

impl Contract<GameEngine, Move> for MoveContract {
    fn pre(engine: &GameEngine, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, engine)
    }

    fn post(before: &GameEngine, after: &GameEngine) -> Result<(), MoveError> {
        HanoiInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let delta = before.moves().abs_diff(after.moves());
        if delta > 1 || (delta == 0 && before.moves() != 0) {
            warn!(before = before.moves(), after = after.moves(), "Move counter drifted");
            return Err(MoveError::InvariantViolation(format!(
                "Move counter went from {} to {}",
                before.moves(),
                after.moves()
            )));
        }

        Ok(())
    }
}
