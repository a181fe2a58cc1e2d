//! First-class action types for Towers of Hanoi.
//!
//! A move is a domain event: it names a source and a destination tower
//! and can be validated, logged, inverted and replayed independently of
//! the engine that executes it.

use super::types::{Disc, TowerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Relocation of the top disc of one tower onto another.
///
/// `from == to` is representable; it is rejected when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    from: TowerId,
    to: TowerId,
}

impl Move {
    /// Builds a move from 1-based tower numbers.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::NoSuchTower` if either number is outside 1-3.
    #[instrument]
    pub fn from_numbers(from: usize, to: usize) -> Result<Self, MoveError> {
        let from = TowerId::from_number(from).ok_or(MoveError::NoSuchTower(from))?;
        let to = TowerId::from_number(to).ok_or(MoveError::NoSuchTower(to))?;
        Ok(Self { from, to })
    }

    /// Source tower.
    pub fn from(&self) -> TowerId {
        self.from
    }

    /// Destination tower.
    pub fn to(&self) -> TowerId {
        self.to
    }

    /// The move that takes the disc back where it came from.
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from.label(), self.to.label())
    }
}

/// Whether a move is played forward or taken back.
///
/// Both directions obey the same legality rules; only the move counter differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A new or redone move, increments the counter.
    Forward,
    /// An undone move, decrements the counter.
    Reverse,
}

/// Error that can occur when validating or applying a move.
///
/// All variants are recoverable: the engine is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The source tower has no disc.
    #[display("No disc to move on tower {}", _0)]
    EmptySource(TowerId),

    /// Source and destination are the same tower.
    #[display("Destination tower needs to be different from source tower {}", _0)]
    SameTower(TowerId),

    /// The moving disc is larger than the destination's top disc.
    #[display("Disc {} cannot be placed on top of smaller disc {}", disc, target)]
    SizeViolation {
        /// Disc being moved.
        disc: Disc,
        /// Top disc of the destination tower.
        target: Disc,
    },

    /// A tower number outside 1-3.
    #[display("There is no tower numbered {}", _0)]
    NoSuchTower(usize),

    /// A new game was requested with an unsupported disc count.
    #[display("Disc count {} is outside the allowed range {}..={}", requested, min, max)]
    DiscCountOutOfRange {
        /// Requested disc count.
        requested: Disc,
        /// Configured minimum.
        min: Disc,
        /// Configured maximum.
        max: Disc,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
