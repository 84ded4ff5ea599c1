//! Boolean obstacle lookup over grid cells.

use crate::Position;

/// A `width x height` boolean mask marking impassable cells.
///
/// Cells are stored row-major (`index = y * width + x`). The mask is built
/// once by the caller and is read-only for the lifetime of a search; the
/// engine takes ownership of its copy and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleMask {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl ObstacleMask {
    /// Create an all-passable mask. Non-positive dimensions yield an empty
    /// mask that contains no cell; the search engine rejects those at
    /// construction.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![false; len],
        }
    }

    /// Width (number of columns).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height (number of rows).
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is a valid cell of the grid, edge row/column 0 included.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Mark a cell impassable. Out-of-bounds positions are ignored.
    pub fn block(&mut self, p: Position) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = true;
        }
    }

    /// Whether `p` is impassable. Positions outside the grid are reported
    /// as blocked.
    #[inline]
    pub fn blocked(&self, p: Position) -> bool {
        match self.idx(p) {
            Some(i) => self.cells[i],
            None => true,
        }
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    #[inline]
    fn idx(&self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mask_is_all_passable() {
        let m = ObstacleMask::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert!(!m.blocked(Position::new(x, y)));
            }
        }
        assert_eq!(m.blocked_count(), 0);
    }

    #[test]
    fn block_and_query() {
        let mut m = ObstacleMask::new(4, 3);
        m.block(Position::new(2, 1));
        assert!(m.blocked(Position::new(2, 1)));
        assert!(!m.blocked(Position::new(1, 2)));
        assert_eq!(m.blocked_count(), 1);
    }

    #[test]
    fn edge_row_and_column_zero_are_valid() {
        let m = ObstacleMask::new(3, 3);
        assert!(m.contains(Position::new(0, 0)));
        assert!(m.contains(Position::new(0, 2)));
        assert!(m.contains(Position::new(2, 0)));
        assert!(!m.contains(Position::new(3, 0)));
        assert!(!m.contains(Position::new(0, 3)));
        assert!(!m.contains(Position::new(-1, 0)));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let mut m = ObstacleMask::new(2, 2);
        assert!(m.blocked(Position::new(-1, 0)));
        assert!(m.blocked(Position::new(0, 2)));
        // Blocking out of bounds is a no-op.
        m.block(Position::new(5, 5));
        assert_eq!(m.blocked_count(), 0);
    }
}
