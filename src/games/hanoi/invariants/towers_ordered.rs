//! Ordering invariant: no disc rests on a smaller one.

use super::super::GameEngine;
use super::Invariant;

/// Invariant: every tower is strictly increasing from top to bottom.
pub struct TowersOrderedInvariant;

impl Invariant<GameEngine> for TowersOrderedInvariant {
    fn holds(engine: &GameEngine) -> bool {
        engine.towers().iter().all(|tower| tower.is_ordered())
    }

    fn description() -> &'static str {
        "Every tower has its smallest disc on top"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hanoi::TowerId;

    #[test]
    fn test_fresh_game_holds() {
        let mut engine = GameEngine::default();
        engine.reset_game(7).unwrap();
        assert!(TowersOrderedInvariant::holds(&engine));
    }

    #[test]
    fn test_larger_on_smaller_violates() {
        let mut engine = GameEngine::default();
        engine.reset_game(2).unwrap();
        // Force disc 1 to the bottom of T2 and disc 2 above it
        let first = TowerId::First.to_index();
        let second = TowerId::Second.to_index();
        let top = engine.towers[first].pop().unwrap();
        let bottom = engine.towers[first].pop().unwrap();
        engine.towers[second].push(top);
        engine.towers[second].push(bottom);
        assert!(!TowersOrderedInvariant::holds(&engine));
    }
}
