//! **gridstep-problem** — textual problem descriptions for the search engine.
//!
//! A problem file is a whitespace-separated token stream:
//!
//! ```text
//! heuristic_index
//! columns rows
//! start_x start_y
//! goal_x goal_y
//! obstacle_count        (-1 requests random obstacles)
//! x y                   (obstacle_count pairs)
//! ...
//! ```
//!
//! Parsing validates dimensions and endpoint coordinates; an out-of-range
//! heuristic index is accepted and falls back to the zero heuristic, per the
//! catalog contract. A negative-one obstacle count asks the parser to fill
//! roughly a quarter of the grid with randomly placed obstacles, never on
//! the start or goal cell.

use std::fmt;
use std::str::SplitAsciiWhitespace;

use rand::Rng;
use rand::seq::SliceRandom;

use gridstep_core::{ObstacleMask, Position};
use gridstep_search::{AStar, Heuristic, SearchError};

/// Largest accepted grid width.
pub const MAX_COLUMNS: i32 = 1000;
/// Largest accepted grid height.
pub const MAX_ROWS: i32 = 1000;

/// A fully validated problem instance, ready to build an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    heuristic: Heuristic,
    columns: i32,
    rows: i32,
    start: Position,
    goal: Position,
    obstacles: Vec<Position>,
}

/// Problem-description parse and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// The token stream ended before `field` was read.
    MissingField(&'static str),
    /// A token could not be parsed as an integer.
    InvalidNumber { field: &'static str, token: String },
    /// Columns or rows outside `[1, 1000]`.
    DimensionsOutOfRange { columns: i64, rows: i64 },
    /// Start or goal outside the grid.
    EndpointOutOfBounds { field: &'static str, pos: Position },
    /// An obstacle coordinate outside the grid.
    ObstacleOutOfBounds { index: usize, pos: Position },
    /// Obstacle count below -1 or above `columns * rows - 2`.
    ObstacleCountOutOfRange { count: i64, max: i64 },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "problem file ends before {field}"),
            Self::InvalidNumber { field, token } => {
                write!(f, "{field}: expected an integer, found \u{201c}{token}\u{201d}")
            }
            Self::DimensionsOutOfRange { columns, rows } => write!(
                f,
                "grid {columns}x{rows} outside the accepted [1, {MAX_COLUMNS}]x[1, {MAX_ROWS}]"
            ),
            Self::EndpointOutOfBounds { field, pos } => {
                write!(f, "{field} {pos} is outside the grid")
            }
            Self::ObstacleOutOfBounds { index, pos } => {
                write!(f, "obstacle #{index} {pos} is outside the grid")
            }
            Self::ObstacleCountOutOfRange { count, max } => {
                write!(f, "obstacle count {count} outside [-1, {max}]")
            }
        }
    }
}

impl std::error::Error for ProblemError {}

/// Token-stream reader over a problem description.
struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_ascii_whitespace(),
        }
    }

    fn int(&mut self, field: &'static str) -> Result<i64, ProblemError> {
        let token = self.inner.next().ok_or(ProblemError::MissingField(field))?;
        token.parse().map_err(|_| ProblemError::InvalidNumber {
            field,
            token: token.to_owned(),
        })
    }

    fn position(&mut self, field: &'static str) -> Result<Position, ProblemError> {
        // Coordinates too large for i32 become a sentinel that fails every
        // bounds check downstream.
        let x = i32::try_from(self.int(field)?).unwrap_or(i32::MIN);
        let y = i32::try_from(self.int(field)?).unwrap_or(i32::MIN);
        Ok(Position::new(x, y))
    }
}

impl Problem {
    /// Parse a problem description.
    ///
    /// `rng` is consulted only when the obstacle count is -1, to place the
    /// random obstacles; deterministic replay therefore needs a seeded rng.
    pub fn parse<R: Rng>(text: &str, rng: &mut R) -> Result<Self, ProblemError> {
        let mut tokens = Tokens::new(text);

        // Out-of-range indices (including negative ones) select the zero
        // heuristic instead of failing.
        let heuristic_index = tokens.int("heuristic index")?;
        let heuristic = Heuristic::from_index(usize::try_from(heuristic_index).unwrap_or(usize::MAX));

        let columns = tokens.int("columns")?;
        let rows = tokens.int("rows")?;
        if !(1..=i64::from(MAX_COLUMNS)).contains(&columns)
            || !(1..=i64::from(MAX_ROWS)).contains(&rows)
        {
            return Err(ProblemError::DimensionsOutOfRange { columns, rows });
        }
        let (columns, rows) = (columns as i32, rows as i32);

        let in_grid = |p: Position| p.x >= 0 && p.x < columns && p.y >= 0 && p.y < rows;

        let start = tokens.position("start position")?;
        if !in_grid(start) {
            return Err(ProblemError::EndpointOutOfBounds {
                field: "start",
                pos: start,
            });
        }
        let goal = tokens.position("goal position")?;
        if !in_grid(goal) {
            return Err(ProblemError::EndpointOutOfBounds {
                field: "goal",
                pos: goal,
            });
        }

        let max_count = i64::from(columns) * i64::from(rows) - 2;
        let count = tokens.int("obstacle count")?;
        if count < -1 || count > max_count {
            return Err(ProblemError::ObstacleCountOutOfRange {
                count,
                max: max_count,
            });
        }

        let obstacles = if count == -1 {
            random_obstacles(columns, rows, start, goal, rng)
        } else {
            let mut obstacles = Vec::with_capacity(count as usize);
            for index in 0..count as usize {
                let pos = tokens.position("obstacle position")?;
                if !in_grid(pos) {
                    return Err(ProblemError::ObstacleOutOfBounds { index, pos });
                }
                obstacles.push(pos);
            }
            obstacles
        };

        Ok(Self {
            heuristic,
            columns,
            rows,
            start,
            goal,
            obstacles,
        })
    }

    /// The selected heuristic.
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Grid width.
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Grid height.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Start position.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Goal position.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// The obstacle positions (explicit or randomly generated).
    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    /// Build the obstacle mask described by this problem.
    pub fn mask(&self) -> ObstacleMask {
        let mut mask = ObstacleMask::new(self.columns, self.rows);
        for &p in &self.obstacles {
            mask.block(p);
        }
        mask
    }

    /// Build a search engine for this problem.
    ///
    /// Fails when an explicit obstacle covers the start or goal cell.
    pub fn engine(&self) -> Result<AStar, SearchError> {
        AStar::new(self.mask(), self.start, self.goal, self.heuristic)
    }
}

/// Fill roughly a quarter of the grid with obstacles, never covering
/// `start` or `goal`: shuffle the eligible cells and keep a prefix.
fn random_obstacles<R: Rng>(
    columns: i32,
    rows: i32,
    start: Position,
    goal: Position,
    rng: &mut R,
) -> Vec<Position> {
    let mut cells: Vec<Position> = (0..rows)
        .flat_map(|y| (0..columns).map(move |x| Position::new(x, y)))
        .filter(|&p| p != start && p != goal)
        .collect();
    cells.shuffle(rng);
    let target = (columns as usize * rows as usize) / 4;
    cells.truncate(target.min(cells.len()));
    cells
}
