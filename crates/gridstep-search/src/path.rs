use gridstep_core::Position;

/// A candidate route from the search start to some frontier cell.
///
/// A `Path` carries its full position sequence (start to terminal,
/// inclusive), so when the goal is popped the answer is already in hand and
/// no parent-pointer reconstruction pass is needed. `g` counts unit-cost
/// moves; `h` is the heuristic estimate at the terminal cell.
///
/// The sequence is non-empty by construction: every path begins as a
/// single-position start path and only ever grows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<Position>,
    g: i32,
    h: f64,
}

impl Path {
    /// The zero-cost path that sits at `start` with heuristic estimate `h`.
    pub fn start(start: Position, h: f64) -> Self {
        Self {
            steps: vec![start],
            g: 0,
            h,
        }
    }

    /// A new path extending this one by a single unit-cost move to `next`,
    /// whose heuristic estimate is `h`.
    pub fn extend_to(&self, next: Position, h: f64) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(next);
        Self {
            steps,
            g: self.g + 1,
            h,
        }
    }

    /// The cell this path currently represents reaching.
    #[inline]
    pub fn terminal(&self) -> Position {
        self.steps[self.steps.len() - 1]
    }

    /// Accumulated move cost.
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate at the terminal cell.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Priority value `f = g + h`. Frontier extraction is by ascending `f`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g as f64 + self.h
    }

    /// The route so far, start to terminal inclusive.
    pub fn positions(&self) -> &[Position] {
        &self.steps
    }

    /// Consume the path, yielding its route.
    pub fn into_positions(self) -> Vec<Position> {
        self.steps
    }

    /// Number of positions in the route (moves + 1).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true: paths always contain at least the start position.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
