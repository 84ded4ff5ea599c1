use gridstep_core::Position;

use crate::distance::{chebyshev, euclidean, manhattan};

/// The fixed catalog of heuristic estimators, selectable by index.
///
/// Every entry is admissible and consistent for unit-cost 4-connected
/// movement, so A* remains optimal with any of them; they differ only in
/// how much of the grid gets explored before the goal is reached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Index 0: always 0 (Dijkstra-equivalent uninformed search).
    #[default]
    Zero,
    /// Index 1: `max(|dx|, |dy|)`.
    Chebyshev,
    /// Index 2: `|dx| + |dy|`.
    Manhattan,
    /// Index 3: `sqrt(dx² + dy²)`.
    Euclidean,
}

impl Heuristic {
    /// Select a catalog entry by index.
    ///
    /// Out-of-range indices fall back to [`Heuristic::Zero`] rather than
    /// failing: uninformed search is always a safe default.
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Chebyshev,
            2 => Self::Manhattan,
            3 => Self::Euclidean,
            _ => Self::Zero,
        }
    }

    /// Estimated remaining cost from `pos` to `goal`. Always finite and ≥ 0.
    pub fn estimate(self, pos: Position, goal: Position) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Chebyshev => chebyshev(pos, goal) as f64,
            Self::Manhattan => manhattan(pos, goal) as f64,
            Self::Euclidean => euclidean(pos, goal),
        }
    }

    /// All catalog entries, in index order.
    pub const ALL: [Heuristic; 4] = [
        Self::Zero,
        Self::Chebyshev,
        Self::Manhattan,
        Self::Euclidean,
    ];
}
