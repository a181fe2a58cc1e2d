//! Towers of Hanoi: engine, moves, legality contracts and commands.

mod action;
mod command;
mod contracts;
mod engine;
mod invariants;
mod types;

pub use action::{Direction, Move, MoveError};
pub use command::Command;
pub use contracts::{
    Contract, DistinctTowers, LegalMove, MoveContract, SizeOrdered, SourceNotEmpty,
};
pub use engine::GameEngine;
pub use invariants::{
    DiscCountBoundedInvariant, DiscsConservedInvariant, HanoiInvariants, Invariant,
    InvariantSet, InvariantViolation, TowersOrderedInvariant,
};
pub use types::{Disc, DiscBounds, TOWER_COUNT, Tower, TowerId};
