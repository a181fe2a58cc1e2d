//! Core domain types for Towers of Hanoi.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Size of a disc. A disc may only rest on a larger one.
pub type Disc = u8;

/// Number of towers on the board.
pub const TOWER_COUNT: usize = 3;

/// One of the three towers.
///
/// Towers are numbered 1-3 everywhere outside the engine (prompts, session log).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum TowerId {
    /// Starting tower (T1).
    First,
    /// Middle tower (T2).
    Second,
    /// Goal tower (T3).
    Third,
}

impl TowerId {
    /// Converts a 1-based tower number.
    #[instrument]
    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(TowerId::First),
            2 => Some(TowerId::Second),
            3 => Some(TowerId::Third),
            _ => None,
        }
    }

    /// Returns the 1-based tower number.
    pub fn number(self) -> usize {
        self.to_index() + 1
    }

    /// Returns the 0-based index into the tower array.
    pub fn to_index(self) -> usize {
        match self {
            TowerId::First => 0,
            TowerId::Second => 1,
            TowerId::Third => 2,
        }
    }

    /// Label shown under the tower.
    pub fn label(self) -> &'static str {
        match self {
            TowerId::First => "T1",
            TowerId::Second => "T2",
            TowerId::Third => "T3",
        }
    }

    /// All towers, left to right.
    pub fn all() -> impl Iterator<Item = TowerId> {
        TowerId::iter()
    }
}

impl std::fmt::Display for TowerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A single tower.
///
/// Discs are stored bottom to top, so the top disc is the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tower {
    discs: Vec<Disc>,
}

impl Tower {
    /// Creates an empty tower.
    pub fn new() -> Self {
        Self { discs: Vec::new() }
    }

    /// Creates a tower holding discs `1..=count`, smallest on top.
    pub fn filled(count: Disc) -> Self {
        Self {
            discs: (1..=count).rev().collect(),
        }
    }

    /// Returns the top disc, if any.
    pub fn top(&self) -> Option<Disc> {
        self.discs.last().copied()
    }

    /// Number of discs on the tower.
    pub fn len(&self) -> usize {
        self.discs.len()
    }

    /// Whether the tower holds no discs.
    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }

    /// Discs from top to bottom.
    pub fn top_down(&self) -> Vec<Disc> {
        self.discs.iter().rev().copied().collect()
    }

    /// Discs from bottom to top.
    pub fn bottom_up(&self) -> &[Disc] {
        &self.discs
    }

    /// Whether every disc rests on a strictly larger one.
    pub fn is_ordered(&self) -> bool {
        self.discs.windows(2).all(|pair| pair[0] > pair[1])
    }

    pub(crate) fn push(&mut self, disc: Disc) {
        self.discs.push(disc);
    }

    pub(crate) fn pop(&mut self) -> Option<Disc> {
        self.discs.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.discs.clear();
    }
}

/// Inclusive range of disc counts a new game may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscBounds {
    min: Disc,
    max: Disc,
}

impl DiscBounds {
    /// Default fewest discs.
    pub const DEFAULT_MIN: Disc = 2;
    /// Default most discs.
    pub const DEFAULT_MAX: Disc = 7;

    /// Creates bounds, returning `None` unless `1 <= min <= max`.
    pub fn new(min: Disc, max: Disc) -> Option<Self> {
        (min >= 1 && min <= max).then_some(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> Disc {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Disc {
        self.max
    }

    /// Whether `count` lies within the bounds.
    pub fn contains(&self, count: Disc) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl Default for DiscBounds {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
