//! Positional tile storage.
//!
//! `Grid` knows where tiles are and nothing about the rules that move them.
//! Every operation takes any `Position`; positions outside the grid make the
//! operation inert rather than failing. With the `strict-grid` feature those
//! same calls panic instead, so indexing bugs surface during development.

#[cfg(not(feature = "strict-grid"))]
use log::trace;
use serde::{Deserialize, Serialize};

use super::{Position, CELL_COUNT, GRID_SIZE};
use crate::core::Tile;

/// A 4×4 grid of optional tiles.
///
/// ## Usage
///
/// ```
/// use slide_engine::core::{Tile, TileId};
/// use slide_engine::grid::{Grid, Position};
///
/// let mut grid = Grid::new();
/// grid.place(Some(Tile::new(TileId(0), 2)), Position::new(3, 0));
///
/// // Slide it to the left edge
/// grid.move_tile(Position::new(3, 0), Position::new(0, 0));
/// assert_eq!(grid.get(Position::new(0, 0)).map(|t| t.value), Some(2));
/// assert!(grid.get(Position::new(3, 0)).is_none());
///
/// // Out-of-range positions are ignored
/// grid.place(Some(Tile::new(TileId(1), 4)), Position::new(9, 9));
/// assert_eq!(grid.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [Option<Tile>; CELL_COUNT],
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tile at a position.
    ///
    /// Returns `None` if the position is out of range or the cell is empty.
    #[must_use]
    pub fn get(&self, at: Position) -> Option<Tile> {
        let cell = at.cell()?;
        self.cells[cell]
    }

    /// Set a cell, replacing whatever was there. `None` clears it.
    pub fn place(&mut self, tile: Option<Tile>, at: Position) {
        if let Some(cell) = checked(at) {
            self.cells[cell] = tile;
        }
    }

    /// Move the tile at `from` to `to`, leaving `from` empty.
    ///
    /// Does nothing if either position is out of range or `from` is empty.
    /// Moving a tile onto itself leaves it in place. An occupant at `to` is
    /// replaced (a panic under `strict-grid`).
    pub fn move_tile(&mut self, from: Position, to: Position) {
        self.relocate(from, to, None);
    }

    /// Move the tile at `from` to `to`, replacing its value on the way.
    ///
    /// The tile keeps its identity. Same rules as [`Grid::move_tile`].
    pub fn move_with_new_value(&mut self, from: Position, to: Position, new_value: u32) {
        self.relocate(from, to, Some(new_value));
    }

    fn relocate(&mut self, from: Position, to: Position, new_value: Option<u32>) {
        let (Some(src), Some(dst)) = (checked(from), checked(to)) else {
            return;
        };
        let Some(mut tile) = self.cells[src] else {
            return;
        };

        if let Some(value) = new_value {
            tile = tile.with_value(value);
        }

        if src != dst {
            if let Some(occupant) = self.cells[dst] {
                overwritten(occupant, to);
            }
            self.cells[src] = None;
        }
        self.cells[dst] = Some(tile);
    }

    /// Remove every tile.
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    /// Occupied cells in row-major order.
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Position, Tile)> {
        self.tiles().collect()
    }

    /// Iterate occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(cell, tile)| tile.map(|t| (Position::from_cell(cell), t)))
    }

    /// Positions of empty cells in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_none())
            .map(|(cell, _)| Position::from_cell(cell))
            .collect()
    }

    /// Number of tiles on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|tile| tile.is_some()).count()
    }

    /// Check if the grid holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Check if every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Highest tile value, or 0 on an empty grid.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles().map(|(_, tile)| tile.value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|(_, tile)| u64::from(tile.value)).sum()
    }
}

impl std::fmt::Display for Grid {
    /// Tab-separated rows, a blank for each empty cell.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.chunks(GRID_SIZE).enumerate() {
            if row > 0 {
                f.write_str("\n")?;
            }
            for (column, tile) in cells.iter().enumerate() {
                if column > 0 {
                    f.write_str("\t")?;
                }
                match tile {
                    Some(tile) => write!(f, "{}", tile.value)?,
                    None => f.write_str(" ")?,
                }
            }
        }
        Ok(())
    }
}

/// Resolve a position to a cell, reporting out-of-range access.
fn checked(at: Position) -> Option<usize> {
    let cell = at.cell();
    if cell.is_none() {
        #[cfg(feature = "strict-grid")]
        panic!("grid position {at} is out of range");
        #[cfg(not(feature = "strict-grid"))]
        trace!("ignoring out-of-range grid position {at}");
    }
    cell
}

fn overwritten(occupant: Tile, at: Position) {
    #[cfg(feature = "strict-grid")]
    panic!("move onto occupied position {at} would drop {}", occupant.id);
    #[cfg(not(feature = "strict-grid"))]
    trace!("move onto {at} replaces {}", occupant.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileId;

    fn tile(id: u64, value: u32) -> Option<Tile> {
        Some(Tile::new(TileId(id), value))
    }

    #[test]
    fn test_new_is_empty() {
        let grid = Grid::new();
        assert!(grid.is_empty());
        assert!(!grid.is_full());
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.empty_positions().len(), 16);
        assert_eq!(grid.max_value(), 0);
    }

    #[test]
    fn test_place_and_get() {
        let mut grid = Grid::new();
        grid.place(tile(1, 8), Position::new(2, 3));

        assert_eq!(grid.get(Position::new(2, 3)), tile(1, 8));
        assert_eq!(grid.get(Position::new(3, 2)), None);
        assert_eq!(grid.len(), 1);

        grid.place(None, Position::new(2, 3));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_move_clears_source() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(0, 0));

        grid.move_tile(Position::new(0, 0), Position::new(0, 3));

        assert_eq!(grid.get(Position::new(0, 0)), None);
        assert_eq!(grid.get(Position::new(0, 3)), tile(1, 2));
    }

    #[test]
    fn test_move_from_empty_is_noop() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(1, 1));
        let before = grid.clone();

        grid.move_tile(Position::new(0, 0), Position::new(1, 1));

        assert_eq!(grid, before);
    }

    #[test]
    fn test_move_onto_itself_keeps_tile() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(1, 1));

        grid.move_tile(Position::new(1, 1), Position::new(1, 1));
        assert_eq!(grid.get(Position::new(1, 1)), tile(1, 2));

        grid.move_with_new_value(Position::new(1, 1), Position::new(1, 1), 4);
        assert_eq!(grid.get(Position::new(1, 1)), tile(1, 4));
    }

    #[test]
    fn test_move_with_new_value_keeps_identity() {
        let mut grid = Grid::new();
        grid.place(tile(5, 16), Position::new(3, 2));

        grid.move_with_new_value(Position::new(3, 2), Position::new(0, 2), 32);

        assert_eq!(grid.get(Position::new(0, 2)), tile(5, 32));
        assert_eq!(grid.get(Position::new(3, 2)), None);
    }

    #[cfg(not(feature = "strict-grid"))]
    #[test]
    fn test_move_overwrites_destination() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(0, 0));
        grid.place(tile(2, 4), Position::new(1, 0));

        grid.move_tile(Position::new(1, 0), Position::new(0, 0));

        assert_eq!(grid.get(Position::new(0, 0)), tile(2, 4));
        assert_eq!(grid.len(), 1);
    }

    #[cfg(not(feature = "strict-grid"))]
    #[test]
    fn test_out_of_range_is_inert() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(0, 0));
        let before = grid.clone();

        grid.place(tile(2, 4), Position::new(4, 0));
        grid.place(None, Position::new(-1, 0));
        grid.move_tile(Position::new(0, 0), Position::new(0, 4));
        grid.move_tile(Position::new(-1, -1), Position::new(0, 0));
        grid.move_with_new_value(Position::new(0, 0), Position::new(7, 7), 8);

        assert_eq!(grid, before);
        assert_eq!(grid.get(Position::new(4, 0)), None);
    }

    #[cfg(feature = "strict-grid")]
    #[test]
    #[should_panic(expected = "out of range")]
    fn test_strict_out_of_range_panics() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(4, 0));
    }

    #[test]
    fn test_snapshot_row_major() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(3, 3));
        grid.place(tile(2, 4), Position::new(1, 0));
        grid.place(tile(3, 8), Position::new(0, 2));

        let positions: Vec<_> = grid.snapshot().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            positions,
            vec![Position::new(1, 0), Position::new(0, 2), Position::new(3, 3)]
        );
    }

    #[test]
    fn test_full_and_totals() {
        let mut grid = Grid::new();
        for (i, position) in Position::all().enumerate() {
            grid.place(tile(i as u64, 2 << (i % 4)), position);
        }

        assert!(grid.is_full());
        assert!(grid.empty_positions().is_empty());
        assert_eq!(grid.max_value(), 16);
        assert_eq!(grid.total_value(), 4 * (2 + 4 + 8 + 16));

        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new();
        grid.place(tile(1, 2), Position::new(0, 0));
        grid.place(tile(2, 128), Position::new(3, 1));

        let text = grid.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "2\t \t \t ");
        assert_eq!(lines[1], " \t \t \t128");
    }
}
