//! Grid coordinates.
//!
//! A `Position` is a (column, row) pair. Coordinates are signed so callers
//! can express any index, including ones left of or above the grid; only
//! `0..4` on both axes addresses a cell.

use serde::{Deserialize, Serialize};

use super::{CELL_COUNT, GRID_SIZE};

/// A (column, row) coordinate on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal index, 0 is the left edge.
    pub column: i32,
    /// Vertical index, 0 is the top edge.
    pub row: i32,
}

impl Position {
    /// Create a position. Any coordinates are accepted.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Check whether this position addresses a cell.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.column >= 0
            && self.column < GRID_SIZE as i32
            && self.row >= 0
            && self.row < GRID_SIZE as i32
    }

    /// Row-major cell index, or `None` if out of range.
    #[must_use]
    pub const fn cell(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.row as usize * GRID_SIZE + self.column as usize)
        } else {
            None
        }
    }

    /// Position of a row-major cell index.
    ///
    /// `cell` must be below `CELL_COUNT`.
    #[must_use]
    pub const fn from_cell(cell: usize) -> Self {
        debug_assert!(cell < CELL_COUNT);
        Self {
            column: (cell % GRID_SIZE) as i32,
            row: (cell / GRID_SIZE) as i32,
        }
    }

    /// Every valid position, row-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_cell)
    }
}

impl From<(i32, i32)> for Position {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}
