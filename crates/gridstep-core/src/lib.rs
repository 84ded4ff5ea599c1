//! **gridstep-core** — Step-at-a-time grid pathfinding (core types).
//!
//! This crate provides the foundational types used across the *gridstep*
//! workspace: the [`Position`] grid coordinate and the read-only
//! [`ObstacleMask`] that marks impassable cells.

pub mod geom;
pub mod mask;

pub use geom::Position;
pub use mask::ObstacleMask;
