//! Incremental A* shortest-path search on 4-connected grids.
//!
//! The search is exposed as a **step-at-a-time** state machine: the caller
//! constructs an [`AStar`] engine and repeatedly calls [`AStar::step`], each
//! call performing exactly one expansion and reporting the observable delta
//! as a [`StepResult`]. A visualizer drives one step per frame; a solver
//! loops until a terminal result. Both use the same primitive.
//!
//! - [`Heuristic`] — fixed catalog of estimators, selected by index
//!   ([`Heuristic::from_index`]), with the zero heuristic as the safe
//!   fallback (Dijkstra-equivalent uninformed search).
//! - [`Path`] — a candidate route carrying its full position sequence, so
//!   the goal path needs no reconstruction pass.
//! - [`Frontier`] — paths keyed by terminal cell with best-of-duplicates
//!   retention; used for both the open and the closed set.

mod distance;
mod engine;
mod frontier;
mod heuristic;
mod path;

pub use distance::{chebyshev, euclidean, manhattan};
pub use engine::{AStar, SearchError, StepResult};
pub use frontier::Frontier;
pub use heuristic::Heuristic;
pub use path::Path;
