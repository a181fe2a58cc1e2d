//! Disc conservation invariant: every disc exists exactly once.

use super::super::GameEngine;
use super::Invariant;

/// Invariant: the towers together hold discs `1..=n` exactly once each.
///
/// No disc is lost or duplicated by a move or its reversal.
pub struct DiscsConservedInvariant;

impl Invariant<GameEngine> for DiscsConservedInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let mut all: Vec<u8> = engine
            .towers()
            .iter()
            .flat_map(|tower| tower.bottom_up().iter().copied())
            .collect();
        all.sort_unstable();

        all.iter().copied().eq(1..=engine.discs())
    }

    fn description() -> &'static str {
        "Towers hold every disc from 1 to the disc count exactly once"
    }
}
