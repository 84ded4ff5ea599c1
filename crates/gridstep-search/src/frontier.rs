use gridstep_core::Position;

use crate::path::Path;

/// A set of candidate [`Path`]s keyed by their terminal position.
///
/// Invariant: at most one path per terminal cell. When two routes reach the
/// same cell only the cheaper one is retained ([`Frontier::insert_if_better`]);
/// this de-duplication is what keeps the frontier polynomial in grid size.
///
/// Minimum extraction is by ascending `f`; among equal-`f` entries the
/// earliest inserted wins. An updated entry keeps its original insertion
/// slot, so tie-break order is stable and expansion traces are reproducible.
///
/// The engine uses two instances: the open set (to expand) and the closed
/// set (finalized cells).
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: Vec<Path>,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the frontier holds no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The stored path with minimum `f`, or `None` if empty.
    ///
    /// Ties resolve to the earliest inserted entry.
    pub fn best(&self) -> Option<&Path> {
        let mut best: Option<&Path> = None;
        for p in &self.entries {
            match best {
                Some(b) if p.f() < b.f() => best = Some(p),
                None => best = Some(p),
                _ => {}
            }
        }
        best
    }

    /// Look up the path whose terminal cell is `terminal`.
    pub fn get(&self, terminal: Position) -> Option<&Path> {
        self.entries.iter().find(|p| p.terminal() == terminal)
    }

    /// Whether a path terminating at `terminal` is stored.
    pub fn contains(&self, terminal: Position) -> bool {
        self.get(terminal).is_some()
    }

    /// Drop the entry for `terminal`. No-op if absent.
    pub fn remove(&mut self, terminal: Position) {
        if let Some(i) = self.entries.iter().position(|p| p.terminal() == terminal) {
            // Not swap_remove: later entries must keep their relative order
            // for deterministic tie-breaking.
            self.entries.remove(i);
        }
    }

    /// The single mutation primitive.
    ///
    /// Inserts `candidate` when no entry exists for its terminal cell, or
    /// replaces the existing entry when `candidate.f()` is strictly smaller.
    /// Returns whether the frontier changed.
    pub fn insert_if_better(&mut self, candidate: Path) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|p| p.terminal() == candidate.terminal())
        {
            None => {
                self.entries.push(candidate);
                true
            }
            Some(existing) if candidate.f() < existing.f() => {
                *existing = candidate;
                true
            }
            Some(_) => false,
        }
    }

    /// Iterate over the terminal positions of all stored paths, in insertion
    /// order. Intended for display layers painting the frontier.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().map(Path::terminal)
    }
}
