use std::fmt;

use gridstep_core::{ObstacleMask, Position};

use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::path::Path;

/// Observable outcome of one [`AStar::step`] call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepResult {
    /// One expansion happened and the search continues. `expanded` is the
    /// cell whose path was popped from the open set; `opened` lists the
    /// neighbor cells newly added to (or improved in) the open set, in
    /// enumeration order.
    Expanded {
        expanded: Position,
        opened: Vec<Position>,
    },
    /// The goal was reached; `path` is the shortest route from start to
    /// goal inclusive. Never empty — a degenerate start == goal search
    /// yields the single start position.
    Found { path: Vec<Position> },
    /// The open set emptied without reaching the goal: no route exists.
    Exhausted,
}

impl StepResult {
    /// Whether this is one of the two terminal results.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found { .. } | Self::Exhausted)
    }
}

/// Construction-time configuration errors.
///
/// The engine refuses to exist in an invalid state: a search over a
/// degenerate grid or from inside a wall is a caller bug, not an
/// `Exhausted` outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Width or height below 1.
    InvalidDimensions { width: i32, height: i32 },
    /// Start position outside `[0, W) x [0, H)`.
    StartOutOfBounds(Position),
    /// Goal position outside `[0, W) x [0, H)`.
    GoalOutOfBounds(Position),
    /// Start position marked impassable.
    StartBlocked(Position),
    /// Goal position marked impassable.
    GoalBlocked(Position),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::StartOutOfBounds(p) => write!(f, "start {p} is outside the grid"),
            Self::GoalOutOfBounds(p) => write!(f, "goal {p} is outside the grid"),
            Self::StartBlocked(p) => write!(f, "start {p} is an obstacle"),
            Self::GoalBlocked(p) => write!(f, "goal {p} is an obstacle"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Incremental A* search engine over a 4-connected unit-cost grid.
///
/// Each [`AStar::step`] call performs exactly one expansion and returns the
/// observable delta; the caller controls pacing, from one step per animation
/// frame to a tight solve loop. The engine runs to completion of each step
/// synchronously, never blocks, and owns all of its state — independent
/// engines can run side by side with no shared anything.
#[derive(Debug)]
pub struct AStar {
    open: Frontier,
    closed: Frontier,
    start: Position,
    goal: Position,
    heuristic: Heuristic,
    mask: ObstacleMask,
    outcome: Option<StepResult>,
}

impl AStar {
    /// Create an engine for one problem instance.
    ///
    /// The mask carries the grid bounds. The open set is preloaded with the
    /// zero-cost path sitting at `start`, so the first [`AStar::step`] call
    /// expands the start cell (and immediately reports [`StepResult::Found`]
    /// when start == goal).
    pub fn new(
        mask: ObstacleMask,
        start: Position,
        goal: Position,
        heuristic: Heuristic,
    ) -> Result<Self, SearchError> {
        if mask.width() < 1 || mask.height() < 1 {
            return Err(SearchError::InvalidDimensions {
                width: mask.width(),
                height: mask.height(),
            });
        }
        if !mask.contains(start) {
            return Err(SearchError::StartOutOfBounds(start));
        }
        if !mask.contains(goal) {
            return Err(SearchError::GoalOutOfBounds(goal));
        }
        if mask.blocked(start) {
            return Err(SearchError::StartBlocked(start));
        }
        if mask.blocked(goal) {
            return Err(SearchError::GoalBlocked(goal));
        }

        let mut open = Frontier::new();
        open.insert_if_better(Path::start(start, heuristic.estimate(start, goal)));

        Ok(Self {
            open,
            closed: Frontier::new(),
            start,
            goal,
            heuristic,
            mask,
            outcome: None,
        })
    }

    /// Perform one unit of search work.
    ///
    /// Pops the minimum-`f` path from the open set, finishes when it sits on
    /// the goal, otherwise settles its cell into the closed set and offers
    /// each passable, unsettled 4-neighbor to the open set. After a terminal
    /// result this is an idempotent no-op re-reporting the same result.
    pub fn step(&mut self) -> StepResult {
        if let Some(done) = &self.outcome {
            return done.clone();
        }

        let Some(current) = self.open.best().cloned() else {
            log::debug!("open set exhausted without reaching {}", self.goal);
            let result = StepResult::Exhausted;
            self.outcome = Some(result.clone());
            return result;
        };
        let expanded = current.terminal();
        self.open.remove(expanded);

        if expanded == self.goal {
            log::debug!(
                "goal {} reached, cost {} ({} closed cells)",
                self.goal,
                current.g(),
                self.closed.len()
            );
            let result = StepResult::Found {
                path: current.into_positions(),
            };
            self.outcome = Some(result.clone());
            return result;
        }

        // Settle the expanded cell. Closed entries are final: with a
        // consistent heuristic the first pop of a cell carries its optimal
        // cost, so they are never revisited or replaced.
        self.closed.insert_if_better(current.clone());

        let mut opened = Vec::with_capacity(4);
        for neighbor in expanded.neighbors4() {
            if !self.mask.contains(neighbor) || self.mask.blocked(neighbor) {
                continue;
            }
            if self.closed.contains(neighbor) {
                continue;
            }
            let candidate =
                current.extend_to(neighbor, self.heuristic.estimate(neighbor, self.goal));
            if self.open.insert_if_better(candidate) {
                opened.push(neighbor);
            }
        }

        log::trace!("expanded {expanded}, opened {} neighbors", opened.len());
        StepResult::Expanded { expanded, opened }
    }

    /// Run [`AStar::step`] until a terminal result and return it.
    ///
    /// The "solve immediately" cadence of the same stepping primitive.
    pub fn run_to_completion(&mut self) -> StepResult {
        loop {
            let result = self.step();
            if result.is_terminal() {
                return result;
            }
        }
    }

    /// The start position.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The goal position.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// The heuristic in use.
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Whether a terminal result has been reported.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The open set (frontier still to expand). Read-only view for display
    /// layers.
    pub fn open(&self) -> &Frontier {
        &self.open
    }

    /// The closed set (cells with finalized cost). Read-only view for
    /// display layers.
    pub fn closed(&self) -> &Frontier {
        &self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(w: i32, h: i32) -> ObstacleMask {
        ObstacleMask::new(w, h)
    }

    fn engine(mask: ObstacleMask, start: (i32, i32), goal: (i32, i32), h: Heuristic) -> AStar {
        AStar::new(
            mask,
            Position::new(start.0, start.1),
            Position::new(goal.0, goal.1),
            h,
        )
        .unwrap()
    }

    #[test]
    fn construction_validation() {
        let err = AStar::new(
            ObstacleMask::new(0, 5),
            Position::ZERO,
            Position::ZERO,
            Heuristic::Zero,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::InvalidDimensions { width: 0, height: 5 });

        let err = AStar::new(
            ObstacleMask::new(3, 3),
            Position::new(3, 0),
            Position::ZERO,
            Heuristic::Zero,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::StartOutOfBounds(Position::new(3, 0)));

        let err = AStar::new(
            ObstacleMask::new(3, 3),
            Position::ZERO,
            Position::new(0, -1),
            Heuristic::Zero,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::GoalOutOfBounds(Position::new(0, -1)));

        let mut mask = ObstacleMask::new(3, 3);
        mask.block(Position::new(0, 0));
        mask.block(Position::new(2, 2));
        let err = AStar::new(
            mask.clone(),
            Position::new(0, 0),
            Position::new(1, 1),
            Heuristic::Zero,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::StartBlocked(Position::new(0, 0)));
        let err = AStar::new(
            mask,
            Position::new(1, 1),
            Position::new(2, 2),
            Heuristic::Zero,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::GoalBlocked(Position::new(2, 2)));
    }

    #[test]
    fn start_equals_goal_finishes_on_first_step() {
        let mut eng = engine(open_grid(5, 5), (2, 2), (2, 2), Heuristic::Manhattan);
        match eng.step() {
            StepResult::Found { path } => assert_eq!(path, vec![Position::new(2, 2)]),
            other => panic!("expected Found, got {other:?}"),
        }
        assert!(eng.is_finished());
    }

    #[test]
    fn open_grid_path_is_manhattan_optimal() {
        // 5x5, (0,0) -> (4,4): 8 moves, 9 positions.
        let mut eng = engine(open_grid(5, 5), (0, 0), (4, 4), Heuristic::Manhattan);
        match eng.run_to_completion() {
            StepResult::Found { path } => {
                assert_eq!(path.len(), 9);
                assert_eq!(path[0], Position::new(0, 0));
                assert_eq!(path[8], Position::new(4, 4));
                // Every hop is a unit cardinal move.
                for w in path.windows(2) {
                    let d = w[1] - w[0];
                    assert_eq!(d.x.abs() + d.y.abs(), 1);
                }
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn expanded_cells_are_never_revisited() {
        let mut eng = engine(open_grid(5, 5), (0, 0), (4, 4), Heuristic::Manhattan);
        let mut seen = Vec::new();
        loop {
            match eng.step() {
                StepResult::Expanded { expanded, .. } => {
                    assert!(!seen.contains(&expanded), "{expanded} expanded twice");
                    seen.push(expanded);
                }
                StepResult::Found { .. } => break,
                StepResult::Exhausted => panic!("open grid must have a path"),
            }
        }
    }

    #[test]
    fn closed_set_grows_monotonically() {
        let mut eng = engine(open_grid(4, 4), (0, 0), (3, 3), Heuristic::Zero);
        let mut prev = 0;
        while !eng.is_finished() {
            eng.step();
            let now = eng.closed().len();
            assert!(now >= prev);
            prev = now;
        }
    }

    #[test]
    fn all_heuristics_agree_on_cost() {
        // A small maze: wall with one gap forces a detour.
        let mut mask = ObstacleMask::new(6, 6);
        for y in 0..5 {
            mask.block(Position::new(3, y));
        }
        let mut costs = Vec::new();
        for h in Heuristic::ALL {
            let mut eng = engine(mask.clone(), (0, 0), (5, 0), h);
            match eng.run_to_completion() {
                StepResult::Found { path } => costs.push(path.len()),
                other => panic!("expected Found with {h:?}, got {other:?}"),
            }
        }
        assert!(costs.windows(2).all(|w| w[0] == w[1]), "costs {costs:?}");
    }

    #[test]
    fn walled_off_goal_is_exhausted() {
        // 3x3 with a full wall through column 1.
        let mut mask = ObstacleMask::new(3, 3);
        mask.block(Position::new(1, 0));
        mask.block(Position::new(1, 1));
        mask.block(Position::new(1, 2));
        let mut eng = engine(mask, (0, 1), (2, 1), Heuristic::Manhattan);

        // At most one expansion per reachable cell, then one exhausting step.
        let mut steps = 0;
        let result = loop {
            let r = eng.step();
            steps += 1;
            assert!(steps <= 10, "did not terminate within reachable bound");
            if r.is_terminal() {
                break r;
            }
        };
        assert_eq!(result, StepResult::Exhausted);
    }

    #[test]
    fn terminal_results_are_idempotent() {
        let mut eng = engine(open_grid(3, 3), (0, 0), (2, 2), Heuristic::Euclidean);
        let first = eng.run_to_completion();
        let open_len = eng.open().len();
        let closed_len = eng.closed().len();
        for _ in 0..3 {
            assert_eq!(eng.step(), first);
        }
        assert_eq!(eng.open().len(), open_len);
        assert_eq!(eng.closed().len(), closed_len);

        let mut mask = ObstacleMask::new(3, 1);
        mask.block(Position::new(1, 0));
        let mut eng = engine(mask, (0, 0), (2, 0), Heuristic::Zero);
        let first = eng.run_to_completion();
        assert_eq!(first, StepResult::Exhausted);
        assert_eq!(eng.step(), first);
    }

    #[test]
    fn opened_cells_follow_neighbor_order() {
        // First expansion from the center of an open grid opens all four
        // neighbors in up, left, right, down order.
        let mut eng = engine(open_grid(5, 5), (2, 2), (4, 4), Heuristic::Manhattan);
        match eng.step() {
            StepResult::Expanded { expanded, opened } => {
                assert_eq!(expanded, Position::new(2, 2));
                assert_eq!(
                    opened,
                    vec![
                        Position::new(2, 1),
                        Position::new(1, 2),
                        Position::new(3, 2),
                        Position::new(2, 3),
                    ]
                );
            }
            other => panic!("expected Expanded, got {other:?}"),
        }
    }

    #[test]
    fn obstacles_are_never_opened() {
        let mut mask = ObstacleMask::new(3, 3);
        mask.block(Position::new(1, 1));
        let mut eng = engine(mask, (0, 0), (2, 2), Heuristic::Manhattan);
        loop {
            match eng.step() {
                StepResult::Expanded { expanded, opened } => {
                    assert_ne!(expanded, Position::new(1, 1));
                    assert!(!opened.contains(&Position::new(1, 1)));
                }
                StepResult::Found { path } => {
                    assert!(!path.contains(&Position::new(1, 1)));
                    assert_eq!(path.len(), 5); // detour-free Manhattan route
                    break;
                }
                StepResult::Exhausted => panic!("a route around (1,1) exists"),
            }
        }
    }

    #[test]
    fn single_cell_grid() {
        let mut eng = engine(open_grid(1, 1), (0, 0), (0, 0), Heuristic::Zero);
        assert_eq!(
            eng.step(),
            StepResult::Found {
                path: vec![Position::ZERO]
            }
        );
    }
}
