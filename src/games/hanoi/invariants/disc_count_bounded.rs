//! Disc count invariant: a started game respects the configured bounds.

use super::super::GameEngine;
use super::Invariant;

/// Invariant: the disc count is zero (no game yet) or within bounds.
pub struct DiscCountBoundedInvariant;

impl Invariant<GameEngine> for DiscCountBoundedInvariant {
    fn holds(engine: &GameEngine) -> bool {
        engine.discs() == 0 || engine.bounds().contains(engine.discs())
    }

    fn description() -> &'static str {
        "Disc count lies within the configured bounds"
    }
}
