//! Grid storage.
//!
//! The grid is a fixed 4×4 board of optional tiles addressed by
//! (column, row). It has no knowledge of sliding or merging; the rules
//! module drives it through `get`, `place` and the two move operations.

pub mod matrix;
pub mod position;

pub use matrix::Grid;
pub use position::Position;

/// Cells per row and per column.
pub const GRID_SIZE: usize = 4;

/// Total number of cells.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
